//! Error types for quotebook

use thiserror::Error;

/// Result type alias using quotebook's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for quotebook
///
/// No variant is fatal: callers report it (or log it) and keep the prior state.
#[derive(Debug, Error)]
pub enum Error {
    // ============ User Input Errors ============
    /// Empty text or category on add
    #[error("Validation error: {0}")]
    Validation(String),

    /// Import payload is not a JSON array of quotes
    #[error("Format error: {0}")]
    Format(String),

    // ============ Network Errors ============
    /// Remote fetch or push failed
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // ============ Storage Errors ============
    /// Key-value backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ============ System Errors ============
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    // ============ Generic Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Any other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new format error
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Check if the failed operation may succeed on the next sync tick
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Http(_))
    }

    /// Check if the error should be shown to the user rather than only logged
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Format(_))
    }
}
