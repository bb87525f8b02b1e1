//! Quote records and the partial shape accepted by import.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Current wall-clock time in Unix milliseconds.
///
/// Used both for fresh ids and for `last_modified` stamps.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// A single quote, the unit of storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Unique within a collection; derived from creation time.
    pub id: i64,
    /// Quote body, never empty.
    pub text: String,
    /// Category label, never empty.
    pub category: String,
    /// Last modification time in Unix milliseconds.
    pub last_modified: i64,
}

impl Quote {
    /// Create a quote stamped with the current time.
    pub fn new(id: i64, text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            category: category.into(),
            last_modified: now_millis(),
        }
    }

    /// Override the modification stamp.
    pub fn with_last_modified(mut self, last_modified: i64) -> Self {
        self.last_modified = last_modified;
        self
    }
}

/// A quote as it appears in an imported file: `id` and `lastModified` may be missing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraft {
    /// Existing id, if the file carried one.
    #[serde(default)]
    pub id: Option<i64>,
    /// Quote body
    pub text: String,
    /// Category label
    pub category: String,
    /// Existing modification stamp, if the file carried one.
    #[serde(default)]
    pub last_modified: Option<i64>,
}

impl QuoteDraft {
    /// Fill in missing fields and resolve id collisions against `taken`.
    ///
    /// A zero id counts as missing. The assigned id is inserted into `taken`.
    pub(crate) fn complete(self, now: i64, taken: &mut HashSet<i64>) -> Quote {
        let wanted = self
            .id
            .filter(|id| *id != 0 && !taken.contains(id))
            .unwrap_or_else(|| now + fastrand::i64(0..1000));
        let id = next_free_id(wanted, taken);
        taken.insert(id);

        Quote {
            id,
            text: self.text,
            category: self.category,
            last_modified: self.last_modified.filter(|ts| *ts != 0).unwrap_or(now),
        }
    }
}

/// First id at or after `start` that is not in `taken`.
pub(crate) fn next_free_id(start: i64, taken: &HashSet<i64>) -> i64 {
    let mut id = start;
    while taken.contains(&id) {
        id += 1;
    }
    id
}
