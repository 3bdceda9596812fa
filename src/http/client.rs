//! HTTP client carrying the adapter's connection settings and retry policy.

use anyhow::{Context, Result};
use log::debug;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::Semaphore;

use super::retry::{RetryPolicy, with_retry};
use crate::config::AdapterConfig;
use crate::error::GiphyError;

/// Shared HTTP client with a bounded number of in-flight requests.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    permits: Arc<Semaphore>,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn new(config: &AdapterConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(client, config))
    }

    /// Wraps an existing reqwest Client, taking limits and retry policy from `config`.
    pub fn with_client(client: Client, config: &AdapterConfig) -> Self {
        Self {
            client,
            permits: Arc::new(Semaphore::new(config.max_concurrent_requests.max(1))),
            retry: RetryPolicy::from_config(config),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Performs a GET with query parameters and deserializes the JSON body.
    ///
    /// `check` inspects the decoded body; an error it returns is treated like
    /// a transport failure, so retryable ones are retried.
    #[tracing::instrument(skip(self, query, check))]
    pub async fn get_json_with_query<T, C>(
        &self,
        operation_name: &str,
        url: &str,
        query: &[(&str, String)],
        check: C,
    ) -> Result<T, GiphyError>
    where
        T: DeserializeOwned,
        C: Fn(&T) -> Result<(), GiphyError>,
    {
        let check = &check;
        with_retry(self.retry, operation_name, move || async move {
            let body: T = self.get_json_once(url, query).await?;
            check(&body)?;
            Ok(body)
        })
        .await
    }

    /// Single GET attempt without retry.
    async fn get_json_once<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, GiphyError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| GiphyError::Network(e.to_string()))?;

        debug!("GET JSON from {}...", url);

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| GiphyError::from_reqwest(&e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(GiphyError::status(status));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GiphyError::from_reqwest(&e))
    }
}
