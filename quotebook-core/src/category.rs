//! Category index and filter
//!
//! Categories have no storage of their own; they are derived from the
//! collection every time it is needed.

use std::collections::HashSet;
use std::fmt;

use crate::quote::Quote;

/// Persisted value meaning "no category filter".
///
/// Blank, so it can never collide with a real category: add and import both
/// reject blank categories.
pub const ALL_CATEGORIES: &str = "";

/// Distinct categories in order of first occurrence.
pub fn distinct_categories(quotes: &[Quote]) -> Vec<String> {
    let mut seen = HashSet::new();
    quotes
        .iter()
        .filter(|q| seen.insert(q.category.as_str()))
        .map(|q| q.category.clone())
        .collect()
}

/// Which quotes a random draw may pick from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every quote
    #[default]
    All,
    /// Only quotes with exactly this category
    Named(String),
}

impl CategoryFilter {
    /// Parse a persisted value. Blank means no filter; anything else,
    /// including `"all"`, names a category.
    pub fn parse(value: &str) -> Self {
        if value.trim().is_empty() {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }

    /// Value written to the `lastCategory` slot
    pub fn as_slot_value(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Named(name) => name,
        }
    }

    /// Whether a quote passes the filter
    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => quote.category == *name,
        }
    }

    /// Matching quotes, in collection order
    pub fn apply<'a>(&self, quotes: &'a [Quote]) -> Vec<&'a Quote> {
        quotes.iter().filter(|q| self.matches(q)).collect()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All Categories"),
            Self::Named(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(id: i64, category: &str) -> Quote {
        Quote::new(id, format!("quote {}", id), category)
    }

    #[test]
    fn distinct_categories_keeps_first_occurrence_order() {
        let quotes = vec![quote(1, "A"), quote(2, "B"), quote(3, "A")];
        assert_eq!(distinct_categories(&quotes), vec!["A", "B"]);
    }

    #[test]
    fn distinct_categories_of_empty_collection() {
        assert!(distinct_categories(&[]).is_empty());
    }

    #[test]
    fn parse_blank_means_all() {
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("  "), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("Philosophy"),
            CategoryFilter::Named("Philosophy".to_string())
        );
    }

    #[test]
    fn category_named_all_is_not_the_wildcard() {
        let filter = CategoryFilter::parse("all");
        assert_eq!(filter, CategoryFilter::Named("all".to_string()));

        let quotes = vec![quote(1, "all"), quote(2, "Other")];
        let picked = filter.apply(&quotes);
        assert_eq!(picked.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn slot_value_round_trips() {
        let filters = [
            CategoryFilter::All,
            CategoryFilter::Named("Tech".to_string()),
            CategoryFilter::Named("all".to_string()),
        ];
        for filter in filters {
            assert_eq!(CategoryFilter::parse(filter.as_slot_value()), filter);
        }
    }

    #[test]
    fn apply_filters_by_exact_category() {
        let quotes = vec![quote(1, "A"), quote(2, "B"), quote(3, "A")];
        let picked = CategoryFilter::Named("A".to_string()).apply(&quotes);
        assert_eq!(picked.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(CategoryFilter::All.apply(&quotes).len(), 3);
        assert!(CategoryFilter::Named("a".to_string()).apply(&quotes).is_empty());
    }
}
