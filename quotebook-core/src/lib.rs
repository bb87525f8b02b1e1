//! # Quotebook Core
//!
//! Local quote collection with category filtering, JSON import/export and
//! last-write-wins reconciliation against a remote endpoint.
//!
//! This crate provides:
//! - Quote model (`quote`) - records and the partial import shape
//! - Key-value slots (`kv`) - in-memory and file-backed persistence
//! - Quote store (`store`) - the owned collection with load/save
//! - Categories (`category`) - distinct categories and filters
//! - Reconciliation (`reconcile`) - merge a remote batch by id
//! - Remote (`remote`) - remote trait and the remote record mapping
//! - Sync (`sync`) - periodic fetch-merge-persist task
//! - Notifications (`notification`) - user-facing notices

#![warn(missing_docs)]

pub mod category;
pub mod config;
pub mod error;
pub mod kv;
pub mod logging;
pub mod notification;
pub mod quote;
pub mod reconcile;
pub mod remote;
pub mod seed;
pub mod store;
pub mod sync;

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::category::{distinct_categories, CategoryFilter};
    pub use crate::config::QuotebookConfig;
    pub use crate::error::{Error, Result};
    pub use crate::kv::{FileKv, KeyValueStore, MemoryKv};
    pub use crate::notification::{LogNotifier, Notice, Notifier};
    pub use crate::quote::{Quote, QuoteDraft};
    pub use crate::reconcile::{merge, MergeOutcome};
    pub use crate::remote::{QuoteRemote, RemotePost, REMOTE_CATEGORY};
    pub use crate::store::QuoteStore;
    pub use crate::sync::{SyncConfig, SyncManager, SyncService};
}
