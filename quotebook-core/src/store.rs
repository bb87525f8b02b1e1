//! The quote collection and its persistent slot
//!
//! [`QuoteStore`] owns the authoritative ordered collection for the process
//! lifetime. Every mutation is written through to the `quotes` slot before it
//! becomes visible; a failed write leaves the in-memory collection untouched.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::category::{distinct_categories, CategoryFilter};
use crate::error::{Error, Result};
use crate::kv::{KeyValueStore, LAST_CATEGORY_KEY, LAST_QUOTE_KEY, QUOTES_KEY};
use crate::quote::{next_free_id, now_millis, Quote, QuoteDraft};
use crate::reconcile::{merge, MergeOutcome};
use crate::seed::seed_quotes;

/// File name used for exports
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Read the persisted collection, falling back to the seed quotes when the
/// slot is missing or does not hold a JSON array of quotes.
pub async fn load(kv: &dyn KeyValueStore) -> Result<Vec<Quote>> {
    let Some(raw) = kv.get(QUOTES_KEY).await? else {
        debug!("No persisted quotes, using seed data");
        return Ok(seed_quotes());
    };

    match serde_json::from_str::<Vec<Quote>>(&raw) {
        Ok(quotes) => Ok(quotes),
        Err(e) => {
            warn!("Persisted quotes are malformed, using seed data: {}", e);
            Ok(seed_quotes())
        }
    }
}

/// Write the full collection to the `quotes` slot.
pub async fn save(kv: &dyn KeyValueStore, quotes: &[Quote]) -> Result<()> {
    kv.set(QUOTES_KEY, serde_json::to_string(quotes)?).await
}

/// Owned quote collection backed by key-value slots
pub struct QuoteStore {
    /// Persistent slots (`quotes`, `lastCategory`)
    kv: Arc<dyn KeyValueStore>,
    /// Session slots (`lastQuote`)
    session: Arc<dyn KeyValueStore>,
    quotes: Vec<Quote>,
}

impl QuoteStore {
    /// Load the collection from `kv`. `session` receives the last displayed quote.
    pub async fn open(kv: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Result<Self> {
        let quotes = load(kv.as_ref()).await?;
        info!("Loaded {} quotes", quotes.len());
        Ok(Self {
            kv,
            session,
            quotes,
        })
    }

    /// Persist the current collection
    pub async fn save(&self) -> Result<()> {
        save(self.kv.as_ref(), &self.quotes).await
    }

    /// All quotes in collection order
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Look up a quote by id
    pub fn get(&self, id: i64) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == id)
    }

    /// Number of quotes
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Distinct categories in first-occurrence order
    pub fn categories(&self) -> Vec<String> {
        distinct_categories(&self.quotes)
    }

    /// Add a quote typed in by the user.
    ///
    /// Both fields are trimmed; an empty field is a [`Error::Validation`] and
    /// leaves the collection unchanged.
    pub async fn add(&mut self, text: &str, category: &str) -> Result<Quote> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() || category.is_empty() {
            return Err(Error::validation(
                "Please enter both a quote and a category.",
            ));
        }

        self.refresh().await?;
        let taken = self.taken_ids();
        let now = now_millis();
        let quote = Quote::new(next_free_id(now, &taken), text, category).with_last_modified(now);

        self.quotes.push(quote.clone());
        if let Err(e) = self.save().await {
            self.quotes.pop();
            return Err(e);
        }

        info!(id = quote.id, category = %quote.category, "Added quote");
        Ok(quote)
    }

    /// Append a batch of imported quotes.
    ///
    /// `batch` must be a JSON array whose elements carry string `text` and
    /// `category` fields; anything else is a [`Error::Format`] and nothing is
    /// appended. Missing ids and stamps are synthesized, and ids that clash
    /// with the collection (or an earlier element) are replaced.
    pub async fn import_batch(&mut self, batch: Value) -> Result<Vec<Quote>> {
        let Value::Array(items) = batch else {
            return Err(Error::format(
                "Invalid JSON format. Must be an array of quotes.",
            ));
        };

        let drafts = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| parse_draft(index, item))
            .collect::<Result<Vec<_>>>()?;

        self.refresh().await?;
        let mut taken = self.taken_ids();
        let now = now_millis();
        let imported: Vec<Quote> = drafts
            .into_iter()
            .map(|draft| draft.complete(now, &mut taken))
            .collect();

        let previous_len = self.quotes.len();
        self.quotes.extend(imported.iter().cloned());
        if let Err(e) = self.save().await {
            self.quotes.truncate(previous_len);
            return Err(e);
        }

        info!("Imported {} quotes", imported.len());
        Ok(imported)
    }

    /// Parse `content` as JSON and import it.
    pub async fn import_json(&mut self, content: &str) -> Result<Vec<Quote>> {
        let batch: Value = serde_json::from_str(content)
            .map_err(|e| Error::format(format!("Error parsing JSON file: {}", e)))?;
        self.import_batch(batch).await
    }

    /// Read a JSON file and import it.
    pub async fn import_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<Quote>> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        self.import_json(&content).await
    }

    /// The full collection as a pretty-printed JSON array
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.quotes)?)
    }

    /// Write `quotes.json` into `dir` and return its path.
    pub async fn export_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(EXPORT_FILE_NAME);
        tokio::fs::write(&path, self.export_json()?).await?;
        info!("Exported {} quotes to {:?}", self.quotes.len(), path);
        Ok(path)
    }

    /// Reconcile a remote batch into the collection and persist the result.
    pub async fn apply_remote(&mut self, remote: Vec<Quote>) -> Result<MergeOutcome> {
        self.refresh().await?;
        let outcome = merge(self.quotes.clone(), remote);
        if outcome.changed() {
            save(self.kv.as_ref(), &outcome.quotes).await?;
            self.quotes = outcome.quotes.clone();
        }
        Ok(outcome)
    }

    /// Remember `filter` and draw a random matching quote.
    ///
    /// The drawn quote is written to the session `lastQuote` slot. `None` means
    /// no quote matches the filter.
    pub async fn select(&self, filter: &CategoryFilter) -> Result<Option<Quote>> {
        self.select_with(filter, &mut fastrand::Rng::new()).await
    }

    /// [`select`](Self::select) with a caller-supplied random source.
    pub async fn select_with(
        &self,
        filter: &CategoryFilter,
        rng: &mut fastrand::Rng,
    ) -> Result<Option<Quote>> {
        self.kv
            .set(LAST_CATEGORY_KEY, filter.as_slot_value().to_string())
            .await?;

        let candidates = filter.apply(&self.quotes);
        if candidates.is_empty() {
            return Ok(None);
        }

        let picked = candidates[rng.usize(..candidates.len())].clone();
        self.session
            .set(LAST_QUOTE_KEY, serde_json::to_string(&picked)?)
            .await?;
        Ok(Some(picked))
    }

    /// The filter remembered from the previous selection
    pub async fn last_category(&self) -> Result<CategoryFilter> {
        Ok(self
            .kv
            .get(LAST_CATEGORY_KEY)
            .await?
            .map(|value| CategoryFilter::parse(&value))
            .unwrap_or_default())
    }

    /// Pick up writes made through the same slot by another store instance.
    ///
    /// A missing or malformed slot keeps the in-memory collection (which may
    /// be unsaved seed data).
    async fn refresh(&mut self) -> Result<()> {
        if let Some(raw) = self.kv.get(QUOTES_KEY).await? {
            match serde_json::from_str::<Vec<Quote>>(&raw) {
                Ok(quotes) => self.quotes = quotes,
                Err(e) => warn!("Keeping in-memory quotes, slot is malformed: {}", e),
            }
        }
        Ok(())
    }

    fn taken_ids(&self) -> HashSet<i64> {
        self.quotes.iter().map(|q| q.id).collect()
    }
}

fn parse_draft(index: usize, item: Value) -> Result<QuoteDraft> {
    let draft: QuoteDraft = serde_json::from_value(item)
        .map_err(|e| Error::format(format!("Quote at index {}: {}", index, e)))?;
    if draft.text.trim().is_empty() || draft.category.trim().is_empty() {
        return Err(Error::format(format!(
            "Quote at index {} has an empty text or category",
            index
        )));
    }
    Ok(draft)
}
