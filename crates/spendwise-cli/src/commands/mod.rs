//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analysis` - Recurring, insights, health and dashboard reports
//! - `backup` - Full JSON backup and restore
//! - `budget` - Monthly limits and currency
//! - `categories` - Category registry management
//! - `core` - Init and shared utilities (config, open_db, reference dates)
//! - `expenses` - Expense commands (add, list, edit, delete, clear)
//! - `export` - CSV/JSON/HTML export
//! - `goals` - Savings goal commands

pub mod analysis;
pub mod backup;
pub mod budget;
pub mod categories;
pub mod core;
pub mod expenses;
pub mod export;
pub mod goals;

// Re-export command functions for main.rs
pub use analysis::*;
pub use backup::*;
pub use budget::*;
pub use categories::*;
pub use self::core::*;
pub use expenses::*;
pub use export::*;
pub use goals::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Map user-typed category names to their registry spelling
pub fn resolve_categories(
    db: &spendwise_core::Database,
    names: &[String],
) -> anyhow::Result<Vec<String>> {
    names
        .iter()
        .map(|name| {
            db.get_category_by_name(name)?
                .map(|c| c.name)
                .ok_or_else(|| anyhow::anyhow!("Unknown category: {}", name))
        })
        .collect()
}
