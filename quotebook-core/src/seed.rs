//! Built-in quotes used when no collection has been persisted yet.

use crate::quote::{now_millis, Quote};

/// The default collection, stamped with the current time.
pub fn seed_quotes() -> Vec<Quote> {
    let now = now_millis();
    [
        (1, "Knowledge is power.", "Education"),
        (2, "Simplicity is the ultimate sophistication.", "Philosophy"),
        (
            3,
            "Code is like humor. When you have to explain it, it is bad.",
            "Technology",
        ),
    ]
    .into_iter()
    .map(|(id, text, category)| Quote::new(id, text, category).with_last_modified(now))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::distinct_categories;

    #[test]
    fn seed_has_three_categories() {
        let quotes = seed_quotes();
        assert_eq!(quotes.len(), 3);
        assert_eq!(
            distinct_categories(&quotes),
            vec!["Education", "Philosophy", "Technology"]
        );
    }
}
