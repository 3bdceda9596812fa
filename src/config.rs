use anyhow::{Context, Result};
use log::debug;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::models::Rating;

pub const DEFAULT_BASE_URL: &str = "https://api.giphy.com/v1/gifs";

/// Source of environment variables, abstracted so configuration can be tested.
#[cfg_attr(test, mockall::automock)]
pub trait EnvSource: Send + Sync {
    fn env_var(&self, key: &str) -> Result<String, env::VarError>;
}

/// Reads from the process environment.
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn env_var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

/// Settings for [`GiphyAdapter`](crate::giphy::GiphyAdapter) and its HTTP client.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterConfig {
    pub base_url: String,
    pub limit: u32,
    pub rating: Rating,
    pub lang: String,
    pub timeout: Duration,
    pub retry_attempts: usize,
    pub retry_delay: Duration,
    pub max_concurrent_requests: usize,
    pub max_idle_per_host: usize,
    pub user_agent: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: 10,
            rating: Rating::Pg,
            lang: "en".to_string(),
            timeout: Duration::from_secs(5),
            retry_attempts: 3,
            retry_delay: Duration::from_secs(1),
            max_concurrent_requests: 100,
            max_idle_per_host: 20,
            user_agent: format!("giphy-adapter/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl AdapterConfig {
    /// Defaults tuned for interactive bot use: fewer results, faster failure.
    pub fn service_defaults() -> Self {
        Self {
            limit: 5,
            timeout: Duration::from_secs(3),
            retry_attempts: 2,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// At least one attempt is always made.
    pub fn with_retry_attempts(mut self, attempts: usize) -> Self {
        self.retry_attempts = attempts.max(1);
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_max_concurrent_requests(mut self, max: usize) -> Self {
        self.max_concurrent_requests = max.max(1);
        self
    }

    pub fn with_max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = max;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Overlays `GIPHY_*` environment variables onto `self`.
    pub fn overlay_env<E: EnvSource>(self, env: &E) -> Result<Self> {
        let mut config = self;

        if let Some(url) = lookup(env, "GIPHY_API_URL") {
            debug!("Using GIPHY_API_URL: {}", url);
            config = config.with_base_url(url);
        }
        if let Some(limit) = parse_var::<u32, _>(env, "GIPHY_LIMIT")? {
            config = config.with_limit(limit);
        }
        if let Some(rating) = lookup(env, "GIPHY_RATING") {
            let rating = rating
                .parse::<Rating>()
                .context("Invalid value for GIPHY_RATING")?;
            config = config.with_rating(rating);
        }
        if let Some(lang) = lookup(env, "GIPHY_LANG") {
            config = config.with_lang(lang);
        }
        if let Some(secs) = parse_var::<f64, _>(env, "GIPHY_TIMEOUT_SECS")? {
            let timeout = Duration::try_from_secs_f64(secs)
                .context("Invalid value for GIPHY_TIMEOUT_SECS")?;
            config = config.with_timeout(timeout);
        }
        if let Some(attempts) = parse_var::<usize, _>(env, "GIPHY_RETRY_ATTEMPTS")? {
            config = config.with_retry_attempts(attempts);
        }
        if let Some(ms) = parse_var::<u64, _>(env, "GIPHY_RETRY_DELAY_MS")? {
            config = config.with_retry_delay(Duration::from_millis(ms));
        }

        Ok(config)
    }
}

fn lookup<E: EnvSource>(env: &E, key: &str) -> Option<String> {
    env.env_var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T, E>(env: &E, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    E: EnvSource,
{
    lookup(env, key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid value for {}: {:?}", key, raw))
        })
        .transpose()
}
