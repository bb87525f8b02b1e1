//! File-backed key-value slots (single JSON object)
//!
//! A lightweight persistent slot store, the desktop stand-in for a browser's
//! local storage.
//!
//! # Layout
//! - **Storage**: one JSON object mapping slot name to string value.
//! - **Cache**: all slots kept in memory, refreshed from disk on every access.
//! - **Writes**: read-modify-write of the whole file on every `set`/`remove`,
//!   so slots written by another process sharing the file are kept.
//!
//! A missing or corrupt file opens as an empty store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::warn;

use super::KeyValueStore;
use crate::error::Result;

/// Default file name inside the data directory
pub const DEFAULT_FILE_NAME: &str = "store.json";

/// Key-value slots persisted to a JSON file
#[derive(Clone)]
pub struct FileKv {
    path: PathBuf,
    /// In-memory copy of every slot
    slots: Arc<RwLock<BTreeMap<String, String>>>,
}

impl FileKv {
    /// Open or create a store at `path`
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let slots = Self::load(&path).await?;
        Ok(Self {
            path,
            slots: Arc::new(RwLock::new(slots)),
        })
    }

    /// Open `store.json` inside a data directory
    pub async fn in_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Self::open(dir.as_ref().join(DEFAULT_FILE_NAME)).await
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(path: &Path) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(path).await?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str(&content) {
            Ok(slots) => Ok(slots),
            Err(e) => {
                warn!("Ignoring corrupt slot file {:?}: {}", path, e);
                Ok(BTreeMap::new())
            }
        }
    }

    async fn persist(&self, slots: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(slots)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut slots = self.slots.write().await;
        *slots = Self::load(&self.path).await?;
        Ok(slots.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        // Re-read under the write guard: another process may share the file.
        let mut slots = self.slots.write().await;
        *slots = Self::load(&self.path).await?;
        slots.insert(key.to_string(), value);
        self.persist(&slots).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut slots = self.slots.write().await;
        *slots = Self::load(&self.path).await?;
        if slots.remove(key).is_some() {
            self.persist(&slots).await?;
        }
        Ok(())
    }
}
