//! High-level service for GIF operations, aimed at chat-bot integration.

use anyhow::Result;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::AdapterConfig;
use crate::giphy::{GifSource, GiphyAdapter, HealthStatus};
use crate::keywords::{DEFAULT_MAX_KEYWORDS, extract_keywords};
use crate::models::{GifData, SearchOptions};

/// A GIF chosen for a chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageGif {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub title: String,
    pub url: String,
    pub preview_url: String,
    pub thumbnail_url: String,
    pub width: u32,
    pub height: u32,
    pub rating: String,
    pub query_used: String,
}

/// Flattened view of one search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GifSummary {
    pub id: String,
    pub title: String,
    pub url: String,
    pub preview_url: String,
    pub thumbnail_url: String,
    pub width: u32,
    pub height: u32,
    pub rating: String,
}

impl From<GifData> for GifSummary {
    fn from(gif: GifData) -> Self {
        Self {
            id: gif.id,
            title: gif.title,
            url: gif.original.url,
            preview_url: gif.preview.url,
            thumbnail_url: gif.thumbnail.url,
            width: gif.original.width,
            height: gif.original.height,
            rating: gif.rating,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub total_results: u64,
    pub returned_count: usize,
    pub gifs: Vec<GifSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub service: String,
    pub adapter_healthy: bool,
    pub timestamp: f64,
    pub details: HealthStatus,
}

pub struct GifService<S: GifSource = GiphyAdapter> {
    source: S,
}

impl GifService<GiphyAdapter> {
    /// Creates a service backed by Giphy using [`AdapterConfig::service_defaults`].
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, AdapterConfig::service_defaults())
    }

    pub fn with_config(api_key: impl Into<String>, config: AdapterConfig) -> Result<Self> {
        Ok(Self::with_source(GiphyAdapter::new(api_key, config)?))
    }
}

impl<S: GifSource> GifService<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Picks a GIF matching the gist of `message`.
    ///
    /// Returns `None` for blank messages, when nothing matches, or when the
    /// lookup fails; failures are logged rather than returned.
    #[tracing::instrument(skip(self, options))]
    pub async fn get_gif_for_message(
        &self,
        message: &str,
        options: &SearchOptions,
    ) -> Option<MessageGif> {
        if message.trim().is_empty() {
            warn!("Invalid user message provided");
            return None;
        }

        let query = extract_keywords(message, DEFAULT_MAX_KEYWORDS);
        debug!("Extracted keywords: '{}' from message: '{}'", query, message);

        let result = self.source.get_random_gif(&query, options).await;
        if !result.success {
            let reason = result
                .error
                .map(|e| e.message)
                .unwrap_or(result.message);
            error!("GIF service error for message '{}': {}", message, reason);
            return None;
        }

        match result.data {
            Some(gif) => Some(MessageGif {
                kind: "gif".to_string(),
                id: gif.id,
                title: gif.title,
                url: gif.original.url,
                preview_url: gif.preview.url,
                thumbnail_url: gif.thumbnail.url,
                width: gif.original.width,
                height: gif.original.height,
                rating: gif.rating,
                query_used: query,
            }),
            None => {
                info!("No GIF found for message: '{}'", message);
                None
            }
        }
    }

    /// Searches and flattens the results; `None` when nothing was found or the call failed.
    #[tracing::instrument(skip(self, options))]
    pub async fn search_gifs(&self, query: &str, options: &SearchOptions) -> Option<SearchResults> {
        let result = self.source.search_gifs(query, options).await;
        if !result.success {
            if let Some(e) = &result.error {
                error!("Search error for query '{}': {}", query, e.message);
            }
            return None;
        }

        let gifs = result.data.filter(|gifs| !gifs.is_empty())?;
        let total_results = result.pagination.map(|p| p.total).unwrap_or(0);

        Some(SearchResults {
            query: query.to_string(),
            total_results,
            returned_count: gifs.len(),
            gifs: gifs.into_iter().map(GifSummary::from).collect(),
        })
    }

    pub async fn health_check(&self) -> ServiceHealth {
        let details = self.source.health_check().await;
        ServiceHealth {
            service: "gif_service".to_string(),
            adapter_healthy: details.healthy,
            timestamp: details.timestamp,
            details,
        }
    }

    /// Releases the underlying source and its connection pool.
    pub async fn close(self) {
        drop(self.source);
        info!("GIF service closed successfully");
    }
}
