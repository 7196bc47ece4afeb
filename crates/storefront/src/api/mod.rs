//! Remote product API client.
//!
//! # Endpoints
//!
//! - `GET /api/products` - every product
//! - `GET /api/products/{id}` - one product, 404 when absent
//! - `GET /api/products/search?keyword=` - filtered products
//! - `GET /api/product/{id}/image` - image bytes, only ever referenced by URL
//!
//! The client returns typed errors; the catalog adapter decides what degrades
//! to empty results.

mod client;

pub use client::{ProductApiClient, image_url};

use thiserror::Error;

/// Maximum characters of a response body copied into logs.
pub(crate) const LOG_BODY_LIMIT: usize = 500;

/// Maximum characters of a response body carried in an [`ApiError`].
pub(crate) const ERROR_BODY_LIMIT: usize = 200;

/// Errors that can occur when talking to the product API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// API answered with a non-success status.
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Whether this error means the resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// First `limit` characters of a response body.
pub(crate) fn truncate_body(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ApiError::NotFound("/api/products/999".to_string());
        assert_eq!(err.to_string(), "Not found: /api/products/999");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unexpected_status_display() {
        let err = ApiError::UnexpectedStatus {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected status 500: boom");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(LOG_BODY_LIMIT + 20);
        assert_eq!(truncate_body(&long, LOG_BODY_LIMIT).len(), LOG_BODY_LIMIT);
        assert_eq!(truncate_body(&long, ERROR_BODY_LIMIT).len(), ERROR_BODY_LIMIT);
        assert_eq!(truncate_body("short", LOG_BODY_LIMIT), "short");
    }
}
