//! Bounded retry with a linearly growing delay.

use log::{debug, warn};
use std::future::Future;
use std::time::Duration;

use crate::config::AdapterConfig;
use crate::error::GiphyError;

/// How many times to try an operation and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: usize,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: usize, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &AdapterConfig) -> Self {
        Self::new(config.retry_attempts, config.retry_delay)
    }

    /// Wait after the given 1-based failed attempt.
    pub fn delay_for(&self, attempt: usize) -> Duration {
        self.delay
            .saturating_mul(u32::try_from(attempt).unwrap_or(u32::MAX))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&AdapterConfig::default())
    }
}

/// Executes an async operation with retry logic.
/// Retries timeouts, network failures, 5xx/429 replies and API envelope errors;
/// gives up immediately on anything else.
pub async fn with_retry<F, Fut, T>(
    policy: RetryPolicy,
    operation_name: &str,
    operation: F,
) -> Result<T, GiphyError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, GiphyError>>,
{
    let mut last_error = None;

    for attempt in 1..=policy.attempts {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if !e.is_retryable() {
                    debug!("{}: non-retryable error: {}", operation_name, e);
                    return Err(e);
                }

                warn!(
                    "{}: attempt {}/{} failed ({})",
                    operation_name, attempt, policy.attempts, e
                );

                if attempt < policy.attempts {
                    let delay = policy.delay_for(attempt);
                    debug!("{}: retrying in {:?}...", operation_name, delay);
                    tokio::time::sleep(delay).await;
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        GiphyError::Network(format!(
            "{}: failed after {} attempts",
            operation_name, policy.attempts
        ))
    }))
}
