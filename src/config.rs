//! Process configuration, read from the environment at startup.

use std::time::Duration;

use url::Url;

use crate::client::builder::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::client::CodaClientBuilder;
use crate::error::ErrorContext;
use crate::{Error, Result};

pub const TOKEN_VAR: &str = "CODA_API_TOKEN";
pub const BASE_URL_VAR: &str = "CODA_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "CODA_HTTP_TIMEOUT_SECS";
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_token: String,
    pub base_url: Url,
    pub http_timeout: Duration,
    pub log_level: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_token = get(TOKEN_VAR).ok_or_else(|| {
            Error::configuration_with_context(
                format!("{} environment variable is required", TOKEN_VAR),
                ErrorContext::new()
                    .with_field_path(TOKEN_VAR)
                    .with_details("Get your API token from https://coda.io/account"),
            )
        })?;

        let raw_url = get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(raw_url.trim()).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid base URL '{}': {}", raw_url, e),
                ErrorContext::new().with_field_path(BASE_URL_VAR),
            )
        })?;

        let http_timeout = match get(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    Error::configuration_with_context(
                        format!("invalid timeout '{}': expected a positive number of seconds", raw),
                        ErrorContext::new().with_field_path(TIMEOUT_VAR),
                    )
                })?,
            None => DEFAULT_TIMEOUT,
        };

        let log_level = get(LOG_LEVEL_VAR)
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            api_token,
            base_url,
            http_timeout,
            log_level,
        })
    }

    pub fn client_builder(&self) -> CodaClientBuilder {
        CodaClientBuilder::new(self.api_token.clone())
            .base_url(self.base_url.as_str())
            .timeout(self.http_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = ServerConfig::from_lookup(lookup(&[(TOKEN_VAR, "secret")])).unwrap();
        assert_eq!(cfg.api_token, "secret");
        assert_eq!(cfg.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(cfg.http_timeout, Duration::from_secs(30));
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn test_missing_token_points_at_account_page() {
        let err = ServerConfig::from_lookup(lookup(&[(TOKEN_VAR, "  ")])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(TOKEN_VAR));
        assert!(msg.contains("https://coda.io/account"));
    }

    #[test]
    fn test_overrides() {
        let cfg = ServerConfig::from_lookup(lookup(&[
            (TOKEN_VAR, "t"),
            (BASE_URL_VAR, "http://localhost:8080/apis/v1"),
            (TIMEOUT_VAR, "5"),
            (LOG_LEVEL_VAR, "DEBUG"),
        ]))
        .unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://localhost:8080/apis/v1");
        assert_eq!(cfg.http_timeout, Duration::from_secs(5));
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn test_invalid_values() {
        assert!(ServerConfig::from_lookup(lookup(&[(TOKEN_VAR, "t"), (BASE_URL_VAR, "not a url")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[(TOKEN_VAR, "t"), (TIMEOUT_VAR, "0")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[(TOKEN_VAR, "t"), (TIMEOUT_VAR, "abc")])).is_err());
    }
}
