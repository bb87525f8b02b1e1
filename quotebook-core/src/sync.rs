//! Periodic remote synchronisation
//!
//! [`SyncService`] runs one pass: fetch the remote batch, merge it into the
//! store, persist, notify. [`SyncManager`] owns the background task that runs
//! passes on a fixed interval.
//!
//! Passes never overlap: a single task drives them and ticks missed while a
//! pass is still running are skipped. A failed fetch is logged and the store
//! is left alone until the next tick; there is no backoff.
//!
//! The store lock is only taken for the merge itself, so a user-triggered add
//! or import may land between a fetch and its merge. The merge still applies
//! cleanly on top of it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::notification::{Notice, Notifier};
use crate::reconcile::MergeOutcome;
use crate::remote::QuoteRemote;
use crate::store::QuoteStore;

/// Default interval between sync passes
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 30;

/// Configuration for the background sync task
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Interval between passes (in seconds)
    pub interval_secs: u64,
    /// Send every local quote to the remote after each fetch
    pub push_local: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_SYNC_INTERVAL_SECS,
            push_local: false,
        }
    }
}

/// One fetch-merge-persist pass against a remote
pub struct SyncService {
    store: Arc<Mutex<QuoteStore>>,
    remote: Arc<dyn QuoteRemote>,
    notifier: Arc<dyn Notifier>,
}

impl SyncService {
    /// Create a service over a shared store
    pub fn new(
        store: Arc<Mutex<QuoteStore>>,
        remote: Arc<dyn QuoteRemote>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            remote,
            notifier,
        }
    }

    /// The shared store
    pub fn store(&self) -> &Arc<Mutex<QuoteStore>> {
        &self.store
    }

    /// Fetch the remote batch and reconcile it into the store.
    ///
    /// A fetch failure is returned as [`Error::Network`] and the store is not
    /// touched.
    pub async fn sync_once(&self) -> Result<MergeOutcome> {
        let remote_quotes = self.remote.fetch_quotes().await.map_err(|e| {
            warn!("Error fetching quotes from {}: {}", self.remote.name(), e);
            into_network(e)
        })?;
        debug!(
            "Fetched {} quotes from {}",
            remote_quotes.len(),
            self.remote.name()
        );

        let outcome = {
            let mut store = self.store.lock().await;
            store.apply_remote(remote_quotes).await?
        };
        info!(
            updated = outcome.updated,
            added = outcome.added,
            "Sync pass with {} complete",
            self.remote.name()
        );

        let notice = Notice::Synced {
            updated: outcome.updated,
            added: outcome.added,
        };
        if let Err(e) = self.notifier.notify(&notice).await {
            warn!("Failed to deliver sync notice: {}", e);
        }

        Ok(outcome)
    }

    /// Send every local quote to the remote, one request per quote.
    ///
    /// Stops at the first failure. Returns how many quotes were sent.
    pub async fn push_all(&self) -> Result<usize> {
        let snapshot = self.store.lock().await.quotes().to_vec();

        for (sent, quote) in snapshot.iter().enumerate() {
            if let Err(e) = self.remote.push_quote(quote).await {
                warn!(
                    "Error sending quotes to {} after {} of {}: {}",
                    self.remote.name(),
                    sent,
                    snapshot.len(),
                    e
                );
                return Err(into_network(e));
            }
        }

        info!("Sent {} quotes to {}", snapshot.len(), self.remote.name());
        Ok(snapshot.len())
    }
}

fn into_network(err: Error) -> Error {
    match err {
        Error::Network(_) => err,
        other => Error::Network(other.to_string()),
    }
}

/// Manager for the background sync task
pub struct SyncManager {
    task: Option<JoinHandle<()>>,
}

impl SyncManager {
    /// Create a new sync manager
    pub fn new() -> Self {
        Self { task: None }
    }

    /// Start the periodic sync task. The first pass runs immediately.
    ///
    /// Does nothing if a task is already running, so at most one loop ever
    /// drives the store.
    pub fn start_periodic_sync(&mut self, service: Arc<SyncService>, config: SyncConfig) {
        if self.is_running() {
            warn!("Periodic sync already running, ignoring second start");
            return;
        }

        let handle = tokio::spawn(async move {
            let interval = Duration::from_secs(config.interval_secs.max(1));
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                debug!("Running scheduled quote sync");

                if service.sync_once().await.is_err() {
                    // Already logged; retried on the next tick.
                    continue;
                }
                if config.push_local {
                    let _ = service.push_all().await;
                }
            }
        });
        self.task = Some(handle);
    }

    /// Whether the background task is alive
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop the background task
    pub async fn shutdown(self) {
        if let Some(task) = self.task {
            info!("Shutting down background sync task");
            task.abort();
        }
        info!("Sync stopped");
    }
}

impl Default for SyncManager {
    fn default() -> Self {
        Self::new()
    }
}
