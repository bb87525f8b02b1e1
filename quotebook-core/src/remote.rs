//! Remote quote collaborator
//!
//! The remote endpoint speaks a different shape (`{id, title, body}` posts) and
//! carries no category or modification time. [`RemotePost::into_quote`] is the
//! single place where that shape becomes a [`Quote`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::quote::Quote;

/// Category assigned to every quote that arrives from the remote endpoint.
pub const REMOTE_CATEGORY: &str = "General";

/// Trait for remote quote endpoints
///
/// Implement this to plug a different server into the sync loop.
#[async_trait]
pub trait QuoteRemote: Send + Sync {
    /// Fetch the remote batch, already mapped into quotes
    async fn fetch_quotes(&self) -> Result<Vec<Quote>>;

    /// Send one quote. The response body is ignored.
    async fn push_quote(&self, quote: &Quote) -> Result<()>;

    /// Remote name for logging
    fn name(&self) -> &'static str;
}

/// A record as served by the remote read endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePost {
    /// Remote id, reused as the quote id
    pub id: i64,
    /// Preferred quote text
    #[serde(default)]
    pub title: Option<String>,
    /// Fallback quote text
    #[serde(default)]
    pub body: Option<String>,
}

impl RemotePost {
    /// Map into a quote fetched at `fetched_at` (Unix ms).
    ///
    /// Text is the title, or the body when the title is missing or blank.
    /// Returns `None` when neither carries text.
    pub fn into_quote(self, fetched_at: i64) -> Option<Quote> {
        let text = self
            .title
            .filter(|t| !t.trim().is_empty())
            .or(self.body.filter(|b| !b.trim().is_empty()))?;

        Some(Quote {
            id: self.id,
            text,
            category: REMOTE_CATEGORY.to_string(),
            last_modified: fetched_at,
        })
    }
}

/// Map a fetched batch, dropping records without text.
pub fn map_remote_posts(posts: Vec<RemotePost>, fetched_at: i64) -> Vec<Quote> {
    posts
        .into_iter()
        .filter_map(|post| {
            let id = post.id;
            let quote = post.into_quote(fetched_at);
            if quote.is_none() {
                tracing::debug!(id, "Dropping remote record without text");
            }
            quote
        })
        .collect()
}
