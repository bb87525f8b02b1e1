//! User-facing notices
//!
//! The core never talks to a user directly; it hands notices to a [`Notifier`]
//! supplied by the presentation layer.

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;

/// Something the user should be told about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A sync pass finished
    Synced {
        /// Local quotes replaced by newer remote versions
        updated: usize,
        /// Remote quotes appended
        added: usize,
    },
    /// An import finished
    Imported {
        /// Quotes appended
        count: usize,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synced { updated, .. } if *updated > 0 => write!(
                f,
                "{} quotes were updated from the server due to conflicts.",
                updated
            ),
            Self::Synced { .. } => write!(f, "Quotes synced with server!"),
            Self::Imported { .. } => write!(f, "Quotes imported successfully!"),
        }
    }
}

/// Trait for delivering notices
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notice
    async fn notify(&self, notice: &Notice) -> Result<()>;
}

/// A notifier that logs to tracing
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notice: &Notice) -> Result<()> {
        tracing::info!("[Notice]: {}", notice);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_notice_wording() {
        let conflicts = Notice::Synced {
            updated: 2,
            added: 0,
        };
        assert_eq!(
            conflicts.to_string(),
            "2 quotes were updated from the server due to conflicts."
        );

        let clean = Notice::Synced {
            updated: 0,
            added: 5,
        };
        assert_eq!(clean.to_string(), "Quotes synced with server!");
    }

    #[tokio::test]
    async fn log_notifier_accepts_everything() {
        LogNotifier
            .notify(&Notice::Imported { count: 3 })
            .await
            .unwrap();
    }
}
