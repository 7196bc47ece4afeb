//! Unified error handling for admin.

use thiserror::Error;

/// Errors raised by admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The product API replaces the image on every update.
    #[error("An image is required when updating a product")]
    ImageRequired,

    /// Form input was rejected.
    #[error("Invalid product: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Local file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl AdminError {
    /// Validation error with a single message.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }
}
