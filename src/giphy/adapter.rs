//! GifSource implementation over the Giphy REST API.

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error};

use super::api::SearchResponse;
use super::{GifSource, HealthStatus};
use crate::config::AdapterConfig;
use crate::error::GiphyError;
use crate::http::HttpClient;
use crate::models::{AdapterResponse, GifData, Pagination, SearchOptions, unix_timestamp};
use crate::validation::{MAX_LIMIT, validate_query, validate_search_params};

const SEARCH_ENDPOINT: &str = "/search";

pub struct GiphyAdapter {
    api_key: String,
    config: AdapterConfig,
    http_client: HttpClient,
}

impl std::fmt::Debug for GiphyAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GiphyAdapter")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl GiphyAdapter {
    /// Creates an adapter; fails with [`GiphyError::Validation`] on a blank key.
    pub fn new(api_key: impl Into<String>, config: AdapterConfig) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GiphyError::Validation("API key is required".to_string()).into());
        }
        let http_client = HttpClient::new(&config)?;
        Ok(Self::from_http_client(api_key, config, http_client))
    }

    /// Create from an existing HttpClient.
    pub fn from_http_client(
        api_key: impl Into<String>,
        config: AdapterConfig,
        http_client: HttpClient,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    fn search_url(&self) -> String {
        format!("{}{}", self.config.base_url, SEARCH_ENDPOINT)
    }

    async fn request_search(
        &self,
        operation_name: &str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<SearchResponse, GiphyError> {
        let url = self.search_url();
        debug!("{}: requesting {} with {:?}", operation_name, url, params);

        params.push(("api_key", self.api_key.clone()));
        self.http_client
            .get_json_with_query(operation_name, &url, &params, SearchResponse::check_meta)
            .await
    }

    async fn try_search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<(Vec<GifData>, Pagination), GiphyError> {
        validate_query(query)?;

        let limit = options.limit.unwrap_or(self.config.limit).min(MAX_LIMIT);
        let offset = options.offset.unwrap_or(0);
        let rating = options.rating.unwrap_or(self.config.rating);
        let lang = options
            .lang
            .clone()
            .unwrap_or_else(|| self.config.lang.clone());

        validate_search_params(limit, offset)?;

        let params = vec![
            ("q", query.trim().to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
            ("rating", rating.to_string()),
            ("lang", lang),
        ];

        let response = self.request_search("search_gifs", params).await?;
        let pagination = response.pagination();
        Ok((response.into_gifs(), pagination))
    }

    fn handle_error<T>(&self, err: &GiphyError, method: &str) -> AdapterResponse<T> {
        error!("Error in {}: {}", method, err);
        AdapterResponse::failure(err, method)
    }
}

#[async_trait]
impl GifSource for GiphyAdapter {
    #[tracing::instrument(skip(self, options))]
    async fn search_gifs(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> AdapterResponse<Vec<GifData>> {
        match self.try_search(query, options).await {
            Ok((gifs, pagination)) => {
                let message = format!("Found {} GIFs", gifs.len());
                AdapterResponse::ok(gifs, message).with_pagination(pagination)
            }
            Err(e) => self.handle_error(&e, "search_gifs"),
        }
    }

    #[tracing::instrument(skip(self, options))]
    async fn get_random_gif(&self, query: &str, options: &SearchOptions) -> AdapterResponse<GifData> {
        let options = SearchOptions {
            limit: Some(1),
            offset: Some(0),
            ..options.clone()
        };
        let result = self.search_gifs(query, &options).await;

        if !result.success {
            return result.into_failure("get_random_gif");
        }

        match result.data.and_then(|gifs| gifs.into_iter().next()) {
            Some(gif) => AdapterResponse::ok(gif, "GIF found"),
            None => AdapterResponse::empty("No GIF found for query"),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> HealthStatus {
        let params = vec![("q", "test".to_string()), ("limit", "1".to_string())];
        let outcome = self.request_search("health_check", params).await;

        HealthStatus {
            healthy: outcome.is_ok(),
            error: outcome.err().map(|e| e.to_string()),
            timestamp: unix_timestamp(),
            service: "giphy".to_string(),
        }
    }
}
