//! Insight Engine - Rule-Based Spending Insights
//!
//! A small set of rules inspects the current month's expenses, the computed
//! category budgets and detected recurring expenses, then surfaces what is
//! worth the user's attention.
//!
//! ## Built-in Rules (evaluation order)
//!
//! - **Budget Alerts** - Categories over or close to their limit
//! - **Spending Trend** - Month-over-month increase or decrease
//! - **Expense Forecaster** - Recurring expenses due soon
//! - **Budget Mastery** - Every budget set and under control
//! - **Top Category** - One category dominates spending
//!
//! ## Usage
//!
//! ```rust,ignore
//! use spendwise_core::insights::{AnalysisContext, InsightEngine};
//!
//! let ctx = AnalysisContext::new(&expenses, &budgets, &recurring, today, now);
//! let insights = InsightEngine::new().generate(&ctx);
//! ```

pub mod budget_alerts;
pub mod budget_mastery;
pub mod engine;
pub mod expense_forecaster;
pub mod spending_trend;
pub mod top_category;
pub mod types;

pub use budget_alerts::BudgetAlertInsight;
pub use budget_mastery::BudgetMasteryInsight;
pub use engine::{
    generate_insights, AnalysisContext, Insight, InsightEngine, DEFAULT_UPCOMING_WINDOW_DAYS,
};
pub use expense_forecaster::ExpenseForecasterInsight;
pub use spending_trend::SpendingTrendInsight;
pub use top_category::TopCategoryInsight;
pub use types::{Finding, InsightKind, SmartInsight};
