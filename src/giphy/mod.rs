//! Giphy search adapter.
//!
//! [`GifSource`] is the seam the service facade talks to; [`GiphyAdapter`]
//! is the implementation backed by the public Giphy REST API.

mod adapter;
mod api;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{AdapterResponse, GifData, SearchOptions};

pub use adapter::GiphyAdapter;

/// Result of probing the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub healthy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: f64,
    pub service: String,
}

/// Anything that can answer GIF searches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GifSource: Send + Sync {
    /// Search for GIFs matching `query`.
    async fn search_gifs(&self, query: &str, options: &SearchOptions)
    -> AdapterResponse<Vec<GifData>>;

    /// Fetch the single best match for `query`.
    async fn get_random_gif(&self, query: &str, options: &SearchOptions)
    -> AdapterResponse<GifData>;

    async fn health_check(&self) -> HealthStatus;
}
