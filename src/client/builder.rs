use crate::client::core::CodaClient;
use crate::error::ErrorContext;
use crate::resilience::rate_limiter::{RateLimiter, RateLimiterConfig};
use crate::transport::HttpTransport;
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://coda.io/apis/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for creating clients with custom configuration.
///
/// Keep this surface area small and predictable.
pub struct CodaClientBuilder {
    api_token: String,
    base_url: Option<String>,
    timeout: Duration,
    rate_limiter: Option<Arc<RateLimiter>>,
}

impl CodaClientBuilder {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            rate_limiter: None,
        }
    }

    /// Override the API base URL (self-hosted proxies, mock servers in tests).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Share a limiter between clients, or tune its windows.
    pub fn rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    pub fn rate_limiter_config(mut self, cfg: RateLimiterConfig) -> Self {
        self.rate_limiter = Some(Arc::new(RateLimiter::new(cfg)));
        self
    }

    pub fn build(self) -> Result<CodaClient> {
        if self.api_token.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "API token must not be empty",
                ErrorContext::new().with_source("client_builder"),
            ));
        }

        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(raw).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid base URL: {}", e),
                ErrorContext::new()
                    .with_details(raw.to_string())
                    .with_source("client_builder"),
            )
        })?;

        let transport = HttpTransport::new(base_url, self.api_token, self.timeout)?;

        Ok(CodaClient {
            transport: Arc::new(transport),
            rate_limiter: self
                .rate_limiter
                .unwrap_or_else(|| Arc::new(RateLimiter::default())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let client = CodaClientBuilder::new("tok").build().unwrap();
        assert_eq!(client.transport.base_url().as_str(), "https://coda.io/apis/v1");
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = CodaClientBuilder::new("  ").build().err().unwrap();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = CodaClientBuilder::new("tok")
            .base_url("not a url")
            .build()
            .err()
            .unwrap();
        assert!(err.to_string().contains("invalid base URL"));
    }

    #[test]
    fn test_shared_rate_limiter() {
        let limiter = Arc::new(RateLimiter::default());
        let a = CodaClientBuilder::new("tok")
            .rate_limiter(limiter.clone())
            .build()
            .unwrap();
        assert!(Arc::ptr_eq(a.rate_limiter(), &limiter));
    }
}
