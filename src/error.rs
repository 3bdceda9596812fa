//! Error categorisation for adapter operations.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse category attached to every failed [`AdapterResponse`](crate::models::AdapterResponse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Timeout,
    ClientError,
    ServerError,
    NetworkError,
    ValidationError,
    UnknownError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::ClientError => "CLIENT_ERROR",
            ErrorKind::ServerError => "SERVER_ERROR",
            ErrorKind::NetworkError => "NETWORK_ERROR",
            ErrorKind::ValidationError => "VALIDATION_ERROR",
            ErrorKind::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while talking to the Giphy API.
#[derive(Debug, Clone, PartialEq)]
pub enum GiphyError {
    /// Caller supplied an invalid argument (empty query, limit out of range, ...)
    Validation(String),
    /// The request did not complete within the configured timeout
    Timeout(String),
    /// The server answered with a non-200 HTTP status
    Status { status: u16, reason: String },
    /// HTTP 200 but the envelope's `meta.status` reported a failure
    Api(String),
    /// Connection, TLS or body transfer failure
    Network(String),
    /// Body was not the JSON we expected
    Decode(String),
}

impl GiphyError {
    pub fn timeout() -> Self {
        GiphyError::Timeout("Request timeout".to_string())
    }

    pub fn status(status: StatusCode) -> Self {
        GiphyError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    /// Maps a transport error onto the adapter's categories.
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            return GiphyError::timeout();
        }
        if let Some(status) = error.status() {
            return GiphyError::status(status);
        }
        if error.is_decode() {
            return GiphyError::Decode(error.to_string());
        }
        GiphyError::Network(error.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GiphyError::Validation(_) => ErrorKind::ValidationError,
            GiphyError::Timeout(_) => ErrorKind::Timeout,
            GiphyError::Status { status, .. } => match status {
                400..=499 => ErrorKind::ClientError,
                500..=599 => ErrorKind::ServerError,
                _ => ErrorKind::UnknownError,
            },
            GiphyError::Network(_) => ErrorKind::NetworkError,
            GiphyError::Api(_) | GiphyError::Decode(_) => ErrorKind::UnknownError,
        }
    }

    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            GiphyError::Timeout(_) | GiphyError::Network(_) | GiphyError::Api(_) => true,
            GiphyError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            GiphyError::Validation(_) | GiphyError::Decode(_) => false,
        }
    }
}

impl fmt::Display for GiphyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GiphyError::Validation(msg) | GiphyError::Timeout(msg) => f.write_str(msg),
            GiphyError::Status { status, reason } => write!(f, "HTTP {}: {}", status, reason),
            GiphyError::Api(msg) => write!(f, "Giphy API Error: {}", msg),
            GiphyError::Network(msg) => write!(f, "Client error: {}", msg),
            GiphyError::Decode(msg) => write!(f, "Failed to parse JSON response: {}", msg),
        }
    }
}

impl std::error::Error for GiphyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display_matches_serde() {
        for kind in [
            ErrorKind::Timeout,
            ErrorKind::ClientError,
            ErrorKind::ServerError,
            ErrorKind::NetworkError,
            ErrorKind::ValidationError,
            ErrorKind::UnknownError,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }

    #[test]
    fn test_timeout_default_message() {
        let err = GiphyError::timeout();
        assert_eq!(err.to_string(), "Request timeout");
        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[test]
    fn test_validation_error() {
        let err = GiphyError::Validation("Invalid input".to_string());
        assert_eq!(err.to_string(), "Invalid input");
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_status_kind_by_range() {
        assert_eq!(
            GiphyError::status(StatusCode::NOT_FOUND).kind(),
            ErrorKind::ClientError
        );
        assert_eq!(
            GiphyError::status(StatusCode::BAD_GATEWAY).kind(),
            ErrorKind::ServerError
        );
        assert_eq!(
            GiphyError::Status {
                status: 302,
                reason: "Found".to_string()
            }
            .kind(),
            ErrorKind::UnknownError
        );
    }

    #[test]
    fn test_status_display() {
        let err = GiphyError::status(StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "HTTP 403: Forbidden");
    }

    #[test]
    fn test_api_error_display() {
        let err = GiphyError::Api("Unauthorized".to_string());
        assert_eq!(err.to_string(), "Giphy API Error: Unauthorized");
        assert_eq!(err.kind(), ErrorKind::UnknownError);
    }

    #[test]
    fn test_retryable_classification() {
        assert!(GiphyError::timeout().is_retryable());
        assert!(GiphyError::Network("connection reset".to_string()).is_retryable());
        assert!(GiphyError::status(StatusCode::SERVICE_UNAVAILABLE).is_retryable());
        assert!(GiphyError::status(StatusCode::TOO_MANY_REQUESTS).is_retryable());
        assert!(!GiphyError::status(StatusCode::UNAUTHORIZED).is_retryable());
        assert!(!GiphyError::status(StatusCode::BAD_REQUEST).is_retryable());
        assert!(!GiphyError::Decode("eof".to_string()).is_retryable());
    }

    #[tokio::test]
    async fn test_from_reqwest_status_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .with_status(503)
            .create_async()
            .await;

        let response = reqwest::Client::new()
            .get(server.url())
            .send()
            .await
            .unwrap();
        let err = response.error_for_status().unwrap_err();

        let mapped = GiphyError::from_reqwest(&err);
        assert_eq!(mapped.kind(), ErrorKind::ServerError);
        assert!(mapped.is_retryable());
    }

    #[tokio::test]
    async fn test_from_reqwest_connect_error() {
        // Nothing listens on port 1
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .unwrap_err();

        let mapped = GiphyError::from_reqwest(&err);
        assert_eq!(mapped.kind(), ErrorKind::NetworkError);
    }
}
