//! Last-write-wins reconciliation of a remote batch into the local collection
//!
//! For each remote quote, in order:
//! - no local quote with the same id: append it
//! - local quote is strictly older: replace it in place
//! - otherwise: keep the local quote (ties favour local)
//!
//! There is no field-level merge and no deletion propagation.

use std::collections::HashMap;

use crate::quote::Quote;

/// Result of a merge pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Merged collection: local order preserved, new remote quotes appended
    pub quotes: Vec<Quote>,
    /// Local quotes replaced by a newer remote version
    pub updated: usize,
    /// Remote quotes appended because no local id matched
    pub added: usize,
}

impl MergeOutcome {
    /// Whether the merge changed anything
    pub fn changed(&self) -> bool {
        self.updated > 0 || self.added > 0
    }
}

/// Merge `remote` into `local` by id.
pub fn merge(local: Vec<Quote>, remote: Vec<Quote>) -> MergeOutcome {
    let mut quotes = local;
    let mut positions: HashMap<i64, usize> = HashMap::with_capacity(quotes.len());
    for (index, quote) in quotes.iter().enumerate() {
        positions.entry(quote.id).or_insert(index);
    }

    let mut updated = 0;
    let mut added = 0;
    for incoming in remote {
        match positions.get(&incoming.id) {
            None => {
                positions.insert(incoming.id, quotes.len());
                quotes.push(incoming);
                added += 1;
            }
            Some(&index) => {
                if incoming.last_modified > quotes[index].last_modified {
                    quotes[index] = incoming;
                    updated += 1;
                }
            }
        }
    }

    MergeOutcome {
        quotes,
        updated,
        added,
    }
}
