//! Async adapter for the Giphy search API.
//!
//! [`GiphyAdapter`] issues search requests with bounded retry and maps the
//! JSON replies onto typed records; [`GifService`] layers keyword extraction
//! on top to answer "find a GIF for this message".

pub mod config;
pub mod error;
pub mod giphy;
pub mod http;
pub mod keywords;
pub mod models;
pub mod service;
pub mod validation;

pub use config::AdapterConfig;
pub use error::{ErrorKind, GiphyError};
pub use giphy::{GifSource, GiphyAdapter, HealthStatus};
pub use keywords::extract_keywords;
pub use models::{AdapterResponse, GifData, GifImage, Pagination, Rating, SearchOptions};
pub use service::{GifService, GifSummary, MessageGif, SearchResults, ServiceHealth};
