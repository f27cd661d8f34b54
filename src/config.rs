//! Client configuration from the environment.
//!
//! - `VITALRISK_API_BASE`: prediction service base URL (default `http://localhost:8000`)
//! - `VITALRISK_REQUEST_TIMEOUT_SECS`: per-request timeout (default 30)

use std::time::Duration;

use url::Url;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const API_BASE_VAR: &str = "VITALRISK_API_BASE";
const REQUEST_TIMEOUT_VAR: &str = "VITALRISK_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid service URL {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("invalid request timeout {0:?}: expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Where and how to reach the prediction service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_base: Url,
    predict_url: Url,
    request_timeout: Duration,
}

impl ClientConfig {
    /// Build a configuration from an explicit base URL.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidUrl` unless `api_base` is an absolute
    /// http(s) URL.
    pub fn new(api_base: &str, request_timeout: Duration) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            value: api_base.to_string(),
            reason,
        };

        let mut base = Url::parse(api_base).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme `{}`", base.scheme())));
        }
        if base.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }

        // Joining against "/api" would replace the last segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let predict_url = base.join("predict").map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            api_base: base,
            predict_url,
            request_timeout,
        })
    }

    /// Load from process environment variables.
    ///
    /// # Errors
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup. Empty values fall back to
    /// the defaults.
    ///
    /// # Errors
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_base = read(API_BASE_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let timeout_secs = match read(REQUEST_TIMEOUT_VAR) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|&secs| secs > 0)
                .ok_or(ConfigError::InvalidTimeout(raw))?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Self::new(&api_base, Duration::from_secs(timeout_secs))
    }

    /// Service root, always ending in `/`. Also the status endpoint.
    #[must_use]
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Prediction endpoint (`{base}/predict`).
    #[must_use]
    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
