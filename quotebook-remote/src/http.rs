//! HTTP remote
//!
//! Reads `GET <endpoint>` as an array of posts and writes one quote per
//! `POST <endpoint>`. The default endpoint is the public jsonplaceholder
//! posts collection, which accepts writes but does not keep them.

use async_trait::async_trait;
use tracing::debug;

use quotebook_core::config::QuotebookConfig;
use quotebook_core::quote::now_millis;
use quotebook_core::remote::map_remote_posts;

use crate::{Error, HttpConfig, Quote, QuoteRemote, RemotePost, Result};

/// Remote endpoint reached over HTTP
pub struct HttpRemote {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRemote {
    /// Create a remote for `endpoint` with default HTTP settings
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_config(endpoint, &HttpConfig::default())
    }

    /// Create a remote for `endpoint` with custom HTTP settings
    pub fn with_config(endpoint: impl Into<String>, config: &HttpConfig) -> Result<Self> {
        let endpoint = endpoint.into();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(Error::Config(format!(
                "Remote URL must be http(s): {}",
                endpoint
            )));
        }

        Ok(Self {
            client: config.build_client()?,
            endpoint,
        })
    }

    /// Create from the endpoint and timeout in a Quotebook config
    pub fn from_config(config: &QuotebookConfig) -> Result<Self> {
        Self::with_config(
            config.remote_url.clone(),
            &HttpConfig::with_timeout(config.http_timeout_secs),
        )
    }

    /// Endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QuoteRemote for HttpRemote {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::network(format!(
                "GET {} returned {}",
                self.endpoint, status
            )));
        }

        let posts: Vec<RemotePost> = response
            .json()
            .await
            .map_err(|e| Error::network(format!("Unexpected response shape: {}", e)))?;
        let fetched_at = now_millis();
        debug!("Received {} remote records", posts.len());

        Ok(map_remote_posts(posts, fetched_at))
    }

    async fn push_quote(&self, quote: &Quote) -> Result<()> {
        let response = self.client.post(&self.endpoint).json(quote).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::network(format!(
                "POST {} returned {} for quote {}",
                self.endpoint, status, quote.id
            )));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_remote_creation() {
        let remote = HttpRemote::new("http://localhost:8080/posts").unwrap();
        assert_eq!(remote.endpoint(), "http://localhost:8080/posts");

        let remote = HttpRemote::from_config(&QuotebookConfig::default()).unwrap();
        assert_eq!(
            remote.endpoint(),
            quotebook_core::config::DEFAULT_REMOTE_URL
        );
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let result = HttpRemote::new("ftp://example.com/posts");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_config() {
        let config = QuotebookConfig {
            remote_url: "https://example.com/quotes".to_string(),
            ..Default::default()
        };
        let remote = HttpRemote::from_config(&config).unwrap();
        assert_eq!(remote.endpoint(), "https://example.com/quotes");
    }
}
