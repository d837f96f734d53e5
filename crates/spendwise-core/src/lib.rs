//! Spendwise Core Library
//!
//! Shared functionality for the Spendwise personal expense tracker:
//! - Key-value store over SQLite holding expenses, budgets, goals and categories
//! - Category budget calculation against monthly limits
//! - Recurring expense detection from interval statistics
//! - Rule-based insight engine
//! - Weighted financial health score
//! - Filtering, summaries and CSV/JSON/HTML export

pub mod budget;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod filter;
pub mod format;
pub mod health;
pub mod insights;
pub mod models;
pub mod period;
pub mod recurring;
pub mod summary;
pub mod validation;

/// Fixtures for building expenses and budgets in tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use budget::compute_budgets;
pub use config::Config;
pub use db::{CategoryUpdate, Database};
pub use error::{Error, Result};
pub use export::{ExportFormat, ExportOptions, FullBackup, ImportStats};
pub use filter::{filter_expenses, DatePreset, ExpenseFilters};
pub use format::{format_currency, format_date};
pub use health::score_health;
pub use insights::{generate_insights, AnalysisContext, InsightEngine, InsightKind, SmartInsight};
pub use models::*;
pub use recurring::{detect_recurring, DetectionConfig};
pub use summary::{calculate_summary, ExpenseSummary};
pub use validation::{validate_expense_form, FormErrors};
