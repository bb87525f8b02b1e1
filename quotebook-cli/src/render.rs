//! Terminal rendering for quotes and notices

use async_trait::async_trait;

use quotebook_core::category::CategoryFilter;
use quotebook_core::error::Result;
use quotebook_core::notification::{Notice, Notifier};
use quotebook_core::quote::Quote;

/// Shown when a filter matches nothing
pub const NO_QUOTES: &str = "No quotes available for this category.";

/// A quote as displayed to the user
pub fn render_quote(quote: &Quote) -> String {
    format!("\"{}\"\nCategory: {}", quote.text, quote.category)
}

/// The category menu, with the active filter marked
pub fn render_categories(categories: &[String], active: &CategoryFilter) -> String {
    let mut lines = Vec::with_capacity(categories.len() + 1);
    lines.push(menu_line(&CategoryFilter::All, active));
    for category in categories {
        lines.push(menu_line(&CategoryFilter::Named(category.clone()), active));
    }
    lines.join("\n")
}

fn menu_line(filter: &CategoryFilter, active: &CategoryFilter) -> String {
    let marker = if filter == active { '*' } else { ' ' };
    format!("{} {}", marker, filter)
}

/// Prints notices to stdout
pub struct StdoutNotifier;

#[async_trait]
impl Notifier for StdoutNotifier {
    async fn notify(&self, notice: &Notice) -> Result<()> {
        println!("{}", notice);
        Ok(())
    }
}
