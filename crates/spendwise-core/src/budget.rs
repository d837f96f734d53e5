//! Category budget calculation
//!
//! Matches the reference month's expenses against the configured per-category
//! limits. One entry is produced per registry category, in registry order,
//! including categories with no spending.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{BudgetSettings, CategoryBudget, Expense};
use crate::period;

/// Compute budget status for every category in `categories`
pub fn compute_budgets<S: AsRef<str>>(
    expenses: &[Expense],
    categories: &[S],
    settings: &BudgetSettings,
    reference: NaiveDate,
) -> Vec<CategoryBudget> {
    let monthly: Vec<&Expense> = period::in_month(expenses, reference).collect();

    let budgets: Vec<CategoryBudget> = categories
        .iter()
        .map(|category| {
            let category = category.as_ref();
            let spent: f64 = monthly
                .iter()
                .filter(|e| e.category == category)
                .map(|e| e.amount)
                .sum();
            let monthly_limit = settings.limit_for(category);

            CategoryBudget {
                category: category.to_string(),
                monthly_limit,
                spent,
                remaining: monthly_limit - spent,
                percentage_used: if monthly_limit > 0.0 {
                    spent / monthly_limit * 100.0
                } else {
                    0.0
                },
            }
        })
        .collect();

    debug!(
        categories = budgets.len(),
        monthly_expenses = monthly.len(),
        "Computed category budgets"
    );

    budgets
}
