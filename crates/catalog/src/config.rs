//! Catalog client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_API_URL` - Base URL of the catalog API
//!
//! ## Optional
//! - `CATALOG_API_TOKEN` - Bearer token sent with every request
//! - `CATALOG_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `CATALOG_CACHE_TTL_SECS` - Response cache TTL in seconds (default: 300)
//! - `CATALOG_CACHE_CAPACITY` - Maximum cached responses (default: 1000)

use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CACHE_TTL_SECS: u64 = 300; // 5 minutes
const DEFAULT_CACHE_CAPACITY: u64 = 1000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog client configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API
    pub api_url: String,
    /// Bearer token sent with every request, when the API requires one
    pub access_token: Option<SecretString>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Response cache TTL in seconds
    pub cache_ttl_secs: u64,
    /// Maximum number of cached responses
    pub cache_capacity: u64,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("api_url", &self.api_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("cache_capacity", &self.cache_capacity)
            .finish()
    }
}

impl CatalogConfig {
    /// Creates a configuration with default timeouts and cache sizing.
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            access_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `CATALOG_API_URL` is missing or a numeric
    /// variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            api_url: get_required_env("CATALOG_API_URL")?,
            access_token: get_optional_env("CATALOG_API_TOKEN").map(SecretString::from),
            timeout_secs: get_parsed_env("CATALOG_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            cache_ttl_secs: get_parsed_env("CATALOG_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
            cache_capacity: get_parsed_env("CATALOG_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable parsed as `T`, or the default when unset.
fn get_parsed_env<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = CatalogConfig::new("https://catalog.test");
        assert_eq!(config.api_url, "https://catalog.test");
        assert!(config.access_token.is_none());
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.cache_ttl_secs, 300);
        assert_eq!(config.cache_capacity, 1000);
    }

    #[test]
    fn test_debug_redacts_access_token() {
        let mut config = CatalogConfig::new("https://catalog.test");
        config.access_token = Some(SecretString::from("super_secret_token"));

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("https://catalog.test"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }

    #[test]
    fn test_missing_env_var_display() {
        let err = ConfigError::MissingEnvVar("CATALOG_API_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: CATALOG_API_URL"
        );
    }

    #[test]
    fn test_parsed_env_defaults_when_unset() {
        let parsed = get_parsed_env("WILDFLOWER_TEST_UNSET_VAR", 42_u64);
        assert!(matches!(parsed, Ok(42)));
    }
}
