//! Spending Trend Insight
//!
//! Compares this month's total against last month's. A rise of more than 20%
//! is a warning; a drop of more than 20% is an achievement.

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightKind};

/// Month-over-month change (percent) that is worth mentioning
pub const TREND_THRESHOLD_PERCENT: f64 = 20.0;

pub struct SpendingTrendInsight;

impl Insight for SpendingTrendInsight {
    fn name(&self) -> &'static str {
        "Spending Trend"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let Some(change) = ctx.month_over_month_change() else {
            return vec![];
        };

        if change > TREND_THRESHOLD_PERCENT {
            vec![Finding::new(
                InsightKind::Warning,
                4,
                "Spending Increased Significantly",
                format!(
                    "Your spending is up {:.0}% compared to last month (${:.2} vs ${:.2}).",
                    change, ctx.this_month_total, ctx.last_month_total
                ),
            )
            .with_amount(ctx.this_month_total)]
        } else if change < -TREND_THRESHOLD_PERCENT {
            vec![Finding::new(
                InsightKind::Achievement,
                3,
                "Great Job Saving!",
                format!(
                    "You've reduced spending by {:.0}% compared to last month. Keep up the good work!",
                    change.abs()
                ),
            )
            .with_amount(ctx.last_month_total - ctx.this_month_total)]
        } else {
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expense;
    use crate::test_utils::{at_noon, date, expense};

    fn run(expenses: &[Expense]) -> Vec<Finding> {
        let today = date(2024, 3, 15);
        let ctx = AnalysisContext::new(expenses, &[], &[], today, at_noon(today));
        SpendingTrendInsight.analyze(&ctx)
    }

    #[test]
    fn test_doubling_spend_warns() {
        let findings = run(&[
            expense("Rent", 1000.0, "Bills", date(2024, 3, 1)),
            expense("Rent", 500.0, "Bills", date(2024, 2, 1)),
        ]);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].title, "Spending Increased Significantly");
        assert_eq!(findings[0].priority, 4);
        assert!(findings[0].message.contains("up 100%"));
    }

    #[test]
    fn test_large_drop_is_an_achievement() {
        let findings = run(&[
            expense("Food", 70.0, "Food", date(2024, 3, 2)),
            expense("Food", 100.0, "Food", date(2024, 2, 2)),
        ]);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, InsightKind::Achievement);
        assert_eq!(findings[0].title, "Great Job Saving!");
        assert_eq!(findings[0].priority, 3);
    }

    #[test]
    fn test_small_change_is_silent() {
        let findings = run(&[
            expense("Food", 110.0, "Food", date(2024, 3, 2)),
            expense("Food", 100.0, "Food", date(2024, 2, 2)),
        ]);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_no_prior_month_is_silent() {
        let findings = run(&[expense("Food", 120.0, "Food", date(2024, 3, 2))]);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_january_compares_against_december() {
        let today = date(2024, 1, 10);
        let expenses = vec![
            expense("Food", 300.0, "Food", date(2024, 1, 2)),
            expense("Food", 100.0, "Food", date(2023, 12, 20)),
        ];
        let ctx = AnalysisContext::new(&expenses, &[], &[], today, at_noon(today));
        let findings = SpendingTrendInsight.analyze(&ctx);
        assert_eq!(findings[0].title, "Spending Increased Significantly");
    }
}
