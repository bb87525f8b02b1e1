//! Runtime configuration
//!
//! Defaults suit a local run; every field can be overridden through a
//! `QUOTEBOOK_*` environment variable via [`QuotebookConfig::from_env`].

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::sync::{SyncConfig, DEFAULT_SYNC_INTERVAL_SECS};

/// Default remote endpoint (read: GET, write: POST)
pub const DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Quotebook configuration
#[derive(Debug, Clone)]
pub struct QuotebookConfig {
    /// Directory holding the slot file
    pub data_dir: PathBuf,
    /// Remote endpoint URL
    pub remote_url: String,
    /// Seconds between sync passes
    pub sync_interval_secs: u64,
    /// HTTP request timeout in seconds
    pub http_timeout_secs: u64,
    /// Directory for rolling log files
    pub log_dir: PathBuf,
    /// Default log level when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for QuotebookConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            sync_interval_secs: DEFAULT_SYNC_INTERVAL_SECS,
            http_timeout_secs: 30,
            log_dir: PathBuf::from("logs"),
            log_level: "info".to_string(),
        }
    }
}

impl QuotebookConfig {
    /// Defaults overridden by `QUOTEBOOK_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = lookup("QUOTEBOOK_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup("QUOTEBOOK_REMOTE_URL") {
            config.remote_url = url;
        }
        if let Some(secs) = lookup("QUOTEBOOK_SYNC_INTERVAL_SECS") {
            config.sync_interval_secs = parse_secs("QUOTEBOOK_SYNC_INTERVAL_SECS", &secs)?;
        }
        if let Some(secs) = lookup("QUOTEBOOK_HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = parse_secs("QUOTEBOOK_HTTP_TIMEOUT_SECS", &secs)?;
        }
        if let Some(dir) = lookup("QUOTEBOOK_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("QUOTEBOOK_LOG_LEVEL") {
            config.log_level = level;
        }

        Ok(config)
    }

    /// Sync task settings derived from this config
    pub fn sync_config(&self, push_local: bool) -> SyncConfig {
        SyncConfig {
            interval_secs: self.sync_interval_secs,
            push_local,
        }
    }
}

fn parse_secs(name: &str, value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(Error::Config(format!("{} must be greater than zero", name))),
        Ok(secs) => Ok(secs),
        Err(e) => Err(Error::Config(format!("{}={:?}: {}", name, value, e))),
    }
}
