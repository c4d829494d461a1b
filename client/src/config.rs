//! Configuration management for the client.

use std::env;
use std::time::Duration;

/// Default base URL of the remote source.
pub const DEFAULT_REMOTE_URL: &str = "http://localhost:8082/";

/// Default location of the local cache.
pub const DEFAULT_CACHE_URL: &str = "sqlite://users.db";

/// Default record field shown for each row.
pub const DEFAULT_DISPLAY_FIELD: &str = "email";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the remote source; records are fetched from `<base>/users`
    pub remote_url: String,
    /// sqlx connection URL of the local cache
    pub cache_url: String,
    /// Optional deadline for remote requests
    pub request_timeout: Option<Duration>,
    /// Record field rendered per row
    pub display_field: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let remote_url =
            lookup("ROSTER_REMOTE_URL").unwrap_or_else(|| DEFAULT_REMOTE_URL.to_string());

        let cache_url = lookup("ROSTER_CACHE_URL").unwrap_or_else(|| DEFAULT_CACHE_URL.to_string());

        let request_timeout = lookup("ROSTER_REQUEST_TIMEOUT_SECS")
            .map(|secs| {
                secs.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| ConfigError::InvalidTimeout(secs))
            })
            .transpose()?;

        let display_field =
            lookup("ROSTER_DISPLAY_FIELD").unwrap_or_else(|| DEFAULT_DISPLAY_FIELD.to_string());

        Ok(Self {
            remote_url,
            cache_url,
            request_timeout,
            display_field,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid ROSTER_REQUEST_TIMEOUT_SECS value: {0}")]
    InvalidTimeout(String),
}
