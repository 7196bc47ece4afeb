//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PRODUCT_API_URL` - Base URL of the product API (default: `http://localhost:8080`)
//! - `CART_STORAGE` - Cart persistence backend: `file`, `memory` or `none` (default: `file`)
//! - `CART_DIR` - Directory for the file backend (default: `.cartlane`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Default product API location.
pub const DEFAULT_PRODUCT_API_URL: &str = "http://localhost:8080";

/// Default directory for the file-backed cart store.
pub const DEFAULT_CART_DIR: &str = ".cartlane";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the cart document is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CartStorageKind {
    /// One JSON file per key under `CART_DIR`.
    #[default]
    File,
    /// Process memory; lost on exit.
    Memory,
    /// No persistence; every load yields the ephemeral cart.
    None,
}

impl FromStr for CartStorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            "none" | "off" => Ok(Self::None),
            other => Err(format!("expected file, memory or none (got '{other}')")),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Product API base URL
    pub api_url: Url,
    /// Cart persistence backend
    pub cart_storage: CartStorageKind,
    /// Directory for the file backend
    pub cart_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_url(
            "PRODUCT_API_URL",
            &get_env_or_default("PRODUCT_API_URL", DEFAULT_PRODUCT_API_URL),
        )?;
        let cart_storage = get_env_or_default("CART_STORAGE", "file")
            .parse::<CartStorageKind>()
            .map_err(|e| ConfigError::InvalidEnvVar("CART_STORAGE".to_string(), e))?;
        let cart_dir = PathBuf::from(get_env_or_default("CART_DIR", DEFAULT_CART_DIR));

        Ok(Self {
            api_url,
            cart_storage,
            cart_dir,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse and validate an absolute http(s) URL.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` naming `key` if the value is not an
/// absolute `http` or `https` URL.
pub fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{scheme}'"),
        )),
    }
}

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}
