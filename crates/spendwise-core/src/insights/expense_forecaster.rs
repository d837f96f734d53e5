//! Expense Forecaster Insight
//!
//! Summarizes detected recurring expenses whose next expected date falls in
//! the upcoming window (today through today + window, inclusive).

use chrono::Duration;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightKind};

pub struct ExpenseForecasterInsight;

impl Insight for ExpenseForecasterInsight {
    fn name(&self) -> &'static str {
        "Expense Forecaster"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let window_end = ctx.today + Duration::days(ctx.upcoming_window_days);

        let upcoming: Vec<_> = ctx
            .recurring
            .iter()
            .filter(|r| r.next_expected >= ctx.today && r.next_expected <= window_end)
            .collect();

        if upcoming.is_empty() {
            return vec![];
        }

        let total: f64 = upcoming.iter().map(|r| r.average_amount).sum();
        let when = match ctx.upcoming_window_days {
            7 => "this week".to_string(),
            0 => "today".to_string(),
            1 => "in the next day".to_string(),
            days => format!("in the next {} days", days),
        };

        vec![Finding::new(
            InsightKind::Prediction,
            3,
            "Upcoming Recurring Expenses",
            format!(
                "{} recurring expense(s) expected {} (~${:.2}). Plan ahead!",
                upcoming.len(),
                when,
                total
            ),
        )
        .with_amount(total)]
    }
}
