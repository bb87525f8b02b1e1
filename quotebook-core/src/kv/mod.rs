//! Key-value slots backing the quote collection and UI state
//!
//! Every value is a string; callers serialize JSON into it themselves. Two
//! backends ship with the crate:
//! - [`MemoryKv`] - process lifetime only, used for session-scoped slots and tests.
//! - [`FileKv`] - a single JSON object file rewritten on every write.

use async_trait::async_trait;

use crate::error::Result;

pub mod file;
pub mod memory;

pub use file::FileKv;
pub use memory::MemoryKv;

/// Persistent slot holding the quote collection as a JSON array.
pub const QUOTES_KEY: &str = "quotes";
/// Persistent slot holding the last selected category filter.
pub const LAST_CATEGORY_KEY: &str = "lastCategory";
/// Session slot holding the last displayed quote as JSON.
pub const LAST_QUOTE_KEY: &str = "lastQuote";

/// A store of named string slots
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. Missing slots are `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a slot, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Remove a slot. Removing a missing slot is a no-op.
    async fn remove(&self, key: &str) -> Result<()>;
}
