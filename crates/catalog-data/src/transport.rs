//! HTTP transport seam.

use std::time::Duration;

use async_trait::async_trait;
use http::header::ACCEPT;
use url::Url;

use crate::error::FetchError;
use crate::response::HttpResponse;

/// Issues plain GET requests. One attempt per call, no retries.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a GET request and return the raw response.
    async fn get(&self, url: &Url) -> Result<HttpResponse, FetchError>;
}

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Total request timeout.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
}

impl TransportConfig {
    /// Create from a total timeout.
    pub fn from_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: concat!("catalog/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// `reqwest`-backed implementation of [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the given configuration.
    pub fn new(config: &TransportConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { http })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(e.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, FetchError> {
        let resp = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(map_reqwest_error)?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_config_from_timeout() {
        let config = TransportConfig::from_timeout(Duration::from_millis(750));
        assert_eq!(config.timeout, Duration::from_millis(750));
        assert!(config.user_agent.starts_with("catalog/"));
    }

    #[test]
    fn test_reqwest_transport_builds() {
        assert!(ReqwestTransport::new(&TransportConfig::default()).is_ok());
    }
}
