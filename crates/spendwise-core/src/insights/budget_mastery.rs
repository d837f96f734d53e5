//! Budget Mastery Insight
//!
//! Congratulates the user when every category has a limit, every limited
//! category is under 90% used, and the month has more than five expenses.

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightKind};

const MASTERY_MAX_PERCENT: f64 = 90.0;
const MASTERY_MIN_EXPENSES: usize = 5;

pub struct BudgetMasteryInsight;

impl Insight for BudgetMasteryInsight {
    fn name(&self) -> &'static str {
        "Budget Mastery"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let all_set = ctx.budgets.iter().all(|b| b.monthly_limit > 0.0);
        let all_under_control = ctx
            .budgets
            .iter()
            .filter(|b| b.monthly_limit > 0.0)
            .all(|b| b.percentage_used < MASTERY_MAX_PERCENT);

        if all_set && all_under_control && ctx.this_month_count > MASTERY_MIN_EXPENSES {
            vec![Finding::new(
                InsightKind::Achievement,
                2,
                "Budget Master!",
                "All your category budgets are on track. You're in great control of your finances!",
            )]
        } else {
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryBudget, Expense};
    use crate::test_utils::{at_noon, budget, date, expense};

    fn six_expenses() -> Vec<Expense> {
        (1..=6)
            .map(|day| expense("Lunch", 10.0, "Food", date(2024, 3, day)))
            .collect()
    }

    fn run(expenses: &[Expense], budgets: &[CategoryBudget]) -> Vec<Finding> {
        let today = date(2024, 3, 15);
        let ctx = AnalysisContext::new(expenses, budgets, &[], today, at_noon(today));
        BudgetMasteryInsight.analyze(&ctx)
    }

    #[test]
    fn test_all_on_track() {
        let budgets = vec![budget("Food", 200.0, 60.0), budget("Bills", 100.0, 0.0)];
        let findings = run(&six_expenses(), &budgets);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].title, "Budget Master!");
        assert_eq!(findings[0].priority, 2);
    }

    #[test]
    fn test_missing_limit_blocks_mastery() {
        let budgets = vec![budget("Food", 200.0, 60.0), budget("Bills", 0.0, 0.0)];
        assert!(run(&six_expenses(), &budgets).is_empty());
    }

    #[test]
    fn test_ninety_percent_blocks_mastery() {
        let budgets = vec![budget("Food", 100.0, 90.0)];
        assert!(run(&six_expenses(), &budgets).is_empty());
    }

    #[test]
    fn test_needs_more_than_five_expenses() {
        let budgets = vec![budget("Food", 200.0, 50.0)];
        let five: Vec<Expense> = six_expenses().into_iter().take(5).collect();
        assert!(run(&five, &budgets).is_empty());
    }

    #[test]
    fn test_empty_budget_list_needs_only_expense_count() {
        let findings = run(&six_expenses(), &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, InsightKind::Achievement);

        let five: Vec<Expense> = six_expenses().into_iter().take(5).collect();
        assert!(run(&five, &[]).is_empty());
    }
}
