//! Mock remote for testing

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{Error, Quote, QuoteRemote, Result};

/// A mock remote serving a fixed batch and recording pushes
#[derive(Default)]
pub struct MockRemote {
    /// Batch returned by every fetch
    batch: Vec<Quote>,
    /// Quotes received through `push_quote`
    pushed: Mutex<Vec<Quote>>,
    /// When set, every call fails with a network error
    offline: AtomicBool,
}

impl MockRemote {
    /// Create a mock serving `batch`
    pub fn new(batch: Vec<Quote>) -> Self {
        Self {
            batch,
            ..Self::default()
        }
    }

    /// Simulate losing or regaining the network
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Quotes pushed so far
    pub fn pushed(&self) -> Vec<Quote> {
        self.pushed
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::network("mock remote is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl QuoteRemote for MockRemote {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>> {
        self.check_online()?;
        Ok(self.batch.clone())
    }

    async fn push_quote(&self, quote: &Quote) -> Result<()> {
        self.check_online()?;
        self.pushed
            .lock()
            .map_err(|e| Error::Internal(e.to_string()))?
            .push(quote.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_remote() {
        let remote = MockRemote::new(vec![Quote::new(1, "Hello", "General")]);
        let fetched = remote.fetch_quotes().await.expect("should succeed");
        assert_eq!(fetched.len(), 1);

        remote.push_quote(&fetched[0]).await.expect("push should succeed");
        assert_eq!(remote.pushed(), fetched);
    }

    #[tokio::test]
    async fn test_offline_mock_fails() {
        let remote = MockRemote::new(vec![]);
        remote.set_offline(true);
        let err = remote.fetch_quotes().await.unwrap_err();
        assert!(err.is_retryable());
    }
}
