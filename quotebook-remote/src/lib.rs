//! # Quotebook Remote
//!
//! Remote endpoint implementations for Quotebook sync.

#![warn(missing_docs)]

// Re-export core types for convenience
pub use quotebook_core::error::{Error, Result};
pub use quotebook_core::quote::Quote;
pub use quotebook_core::remote::{QuoteRemote, RemotePost, REMOTE_CATEGORY};

pub mod http;
pub mod mock;

pub use http::HttpRemote;
pub use mock::MockRemote;

/// HTTP client configuration
#[derive(Clone, Debug)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connection pool idle timeout
    pub pool_idle_timeout_secs: u64,
    /// Max idle connections per host
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            pool_idle_timeout_secs: 90,
            pool_max_idle_per_host: 4,
        }
    }
}

impl HttpConfig {
    /// Default settings with a custom request timeout
    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            timeout_secs,
            ..Self::default()
        }
    }

    /// Build a reqwest client
    pub fn build_client(&self) -> Result<reqwest::Client> {
        use std::time::Duration;

        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .pool_idle_timeout(Duration::from_secs(self.pool_idle_timeout_secs))
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .build()
            .map_err(|e| Error::Internal(e.to_string()))
    }
}
