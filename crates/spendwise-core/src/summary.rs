//! Spending summary over an expense list

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Expense;
use crate::period;

/// Totals and per-category breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub total_spending: f64,
    /// Spending in the reference month
    pub monthly_spending: f64,
    /// Registry categories first (in registry order), then unknown ones by name
    pub category_breakdown: Vec<(String, f64)>,
    pub expense_count: usize,
    pub average_expense: f64,
}

impl ExpenseSummary {
    pub fn category_total(&self, category: &str) -> f64 {
        self.category_breakdown
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, total)| *total)
            .unwrap_or(0.0)
    }
}

/// Summarize `expenses`; every registry category appears even when zero
pub fn calculate_summary<S: AsRef<str>>(
    expenses: &[Expense],
    categories: &[S],
    reference: NaiveDate,
) -> ExpenseSummary {
    let total_spending: f64 = expenses.iter().map(|e| e.amount).sum();

    let mut breakdown: Vec<(String, f64)> = categories
        .iter()
        .map(|c| (c.as_ref().to_string(), 0.0))
        .collect();
    let mut unknown: BTreeMap<String, f64> = BTreeMap::new();

    for expense in expenses {
        match breakdown.iter_mut().find(|(name, _)| *name == expense.category) {
            Some((_, total)) => *total += expense.amount,
            None => *unknown.entry(expense.category.clone()).or_insert(0.0) += expense.amount,
        }
    }
    breakdown.extend(unknown);

    ExpenseSummary {
        total_spending,
        monthly_spending: period::month_total(expenses, reference),
        category_breakdown: breakdown,
        expense_count: expenses.len(),
        average_expense: if expenses.is_empty() {
            0.0
        } else {
            total_spending / expenses.len() as f64
        },
    }
}
