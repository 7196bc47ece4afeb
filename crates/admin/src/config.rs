//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ADMIN_PRODUCT_API_URL` - Product API the admin writes to (falls back to
//!   `PRODUCT_API_URL`, then `http://localhost:8080`)

use thiserror::Error;
use url::Url;

const DEFAULT_PRODUCT_API_URL: &str = "http://localhost:8080";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Product API base URL
    pub api_url: Url,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the API URL is not an absolute http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let (key, value) = get_api_url("ADMIN_PRODUCT_API_URL");
        Ok(Self {
            api_url: parse_url(key, &value)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the API URL with fallback to the storefront's `PRODUCT_API_URL`.
///
/// Returns the variable the value came from so errors name it.
fn get_api_url(primary_key: &'static str) -> (&'static str, String) {
    // Try primary key first (e.g., ADMIN_PRODUCT_API_URL)
    if let Some(value) = get_optional_env(primary_key) {
        return (primary_key, value);
    }
    // Fallback to the shared PRODUCT_API_URL
    if let Some(value) = get_optional_env("PRODUCT_API_URL") {
        return ("PRODUCT_API_URL", value);
    }
    (primary_key, DEFAULT_PRODUCT_API_URL.to_string())
}

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if matches!(url.scheme(), "http" | "https") {
        Ok(url)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_valid() {
        let url = parse_url("ADMIN_PRODUCT_API_URL", "https://api.example.com").unwrap();
        assert_eq!(url.host_str(), Some("api.example.com"));
    }

    #[test]
    fn test_parse_url_names_variable() {
        let err = parse_url("ADMIN_PRODUCT_API_URL", "not a url").unwrap_err();
        assert!(err.to_string().contains("ADMIN_PRODUCT_API_URL"));
    }

    #[test]
    fn test_parse_url_rejects_file_scheme() {
        assert!(parse_url("ADMIN_PRODUCT_API_URL", "file:///etc/passwd").is_err());
    }
}
