//! Typed records returned by the adapter and the service facade.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ErrorKind, GiphyError};

/// One rendition of a GIF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GifImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub size: u64,
}

/// A GIF as returned by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GifData {
    pub id: String,
    pub title: String,
    pub url: String,
    pub rating: String,
    pub created_at: String,
    pub tags: Vec<String>,
    pub original: GifImage,
    pub preview: GifImage,
    pub thumbnail: GifImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Pagination {
    pub total: u64,
    pub count: u64,
    pub offset: u64,
}

/// Details of a failed operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
    pub method: String,
    pub timestamp: f64,
}

/// Uniform result envelope for adapter operations.
///
/// Transport and API failures never surface as `Err`; they are recorded in
/// `error` with `success == false` so callers can inspect the category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub pagination: Option<Pagination>,
    pub message: String,
    pub error: Option<ErrorInfo>,
}

impl<T> AdapterResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: None,
            message: message.into(),
            error: None,
        }
    }

    /// A successful call that produced nothing.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            pagination: None,
            message: message.into(),
            error: None,
        }
    }

    pub fn failure(error: &GiphyError, method: &str) -> Self {
        let message = error.to_string();
        Self {
            success: false,
            data: None,
            pagination: None,
            message: message.clone(),
            error: Some(ErrorInfo {
                kind: error.kind(),
                message,
                method: method.to_string(),
                timestamp: unix_timestamp(),
            }),
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Re-labels a failure under a different operation, dropping any data.
    pub fn into_failure<U>(self, method: &str) -> AdapterResponse<U> {
        AdapterResponse {
            success: false,
            data: None,
            pagination: None,
            message: self.message,
            error: self.error.map(|info| ErrorInfo {
                method: method.to_string(),
                ..info
            }),
        }
    }
}

/// Content rating filter accepted by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Rating {
    #[serde(rename = "g")]
    G,
    #[default]
    #[serde(rename = "pg")]
    Pg,
    #[serde(rename = "pg-13")]
    Pg13,
    #[serde(rename = "r")]
    R,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::G => "g",
            Rating::Pg => "pg",
            Rating::Pg13 => "pg-13",
            Rating::R => "r",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "g" => Ok(Rating::G),
            "pg" => Ok(Rating::Pg),
            "pg-13" => Ok(Rating::Pg13),
            "r" => Ok(Rating::R),
            _ => bail!("Rating must be one of: g, pg, pg-13, r"),
        }
    }
}

/// Per-call overrides; unset fields fall back to the adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub rating: Option<Rating>,
    pub lang: Option<String>,
}

impl SearchOptions {
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

/// Seconds since the unix epoch, as a float.
pub(crate) fn unix_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}
