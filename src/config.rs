//! Client configuration
//!
//! Where the Activity Directory API lives and how long status notices stay
//! on screen.

use crate::error::{ErrorKind, Result};
use std::time::Duration;

pub const API_URL_ENV: &str = "ROSTER_API_URL";
pub const REQUEST_TIMEOUT_ENV: &str = "ROSTER_REQUEST_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL the API paths are appended to. Empty means same origin.
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub success_notice_ttl: Duration,
    pub error_notice_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            success_notice_ttl: Duration::from_millis(2500),
            error_notice_ttl: Duration::from_millis(3000),
        }
    }
}

impl ClientConfig {
    /// Config for a page served by the API itself: requests go to the
    /// page's own origin.
    pub fn same_origin() -> Self {
        Self {
            api_base_url: String::new(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `ROSTER_API_URL` and
    /// `ROSTER_REQUEST_TIMEOUT_SECS` when they are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_ENV) {
            config = config.with_api_base_url(&url);
        }

        if let Some(secs) = lookup(REQUEST_TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|e| {
                ErrorKind::ConfigError(format!("{REQUEST_TIMEOUT_ENV} must be whole seconds: {e}"))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: &str) -> Self {
        self.api_base_url = url.trim().trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_is_empty() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.success_notice_ttl, Duration::from_millis(2500));
        assert_eq!(config.error_notice_ttl, Duration::from_millis(3000));
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (API_URL_ENV, "http://school.example/ "),
            (REQUEST_TIMEOUT_ENV, "3"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://school.example");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let err = ClientConfig::from_lookup(lookup_from(&[(REQUEST_TIMEOUT_ENV, "soon")]))
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ConfigError(_)));
    }
}
