//! Budget Alert Insight
//!
//! Warns about categories that are over budget (priority 5) or within 20% of
//! their limit (priority 4). Categories without a limit are skipped.

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightKind};

/// Usage percentage at which a category is considered close to its limit
pub const BUDGET_WARNING_PERCENT: f64 = 80.0;

pub struct BudgetAlertInsight;

impl Insight for BudgetAlertInsight {
    fn name(&self) -> &'static str {
        "Budget Alerts"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        for budget in ctx.budgets.iter().filter(|b| b.monthly_limit > 0.0) {
            if budget.percentage_used >= 100.0 {
                findings.push(
                    Finding::new(
                        InsightKind::Warning,
                        5,
                        format!("{} Budget Exceeded!", budget.category),
                        format!(
                            "You've spent ${:.2} of your ${:.2} budget ({:.0}%). Consider reducing expenses in this category.",
                            budget.spent, budget.monthly_limit, budget.percentage_used
                        ),
                    )
                    .with_category(&budget.category)
                    .with_amount(budget.spent),
                );
            } else if budget.percentage_used >= BUDGET_WARNING_PERCENT {
                findings.push(
                    Finding::new(
                        InsightKind::Warning,
                        4,
                        format!("{} Budget Warning", budget.category),
                        format!(
                            "You're at {:.0}% of your {} budget with ${:.2} remaining this month.",
                            budget.percentage_used, budget.category, budget.remaining
                        ),
                    )
                    .with_category(&budget.category)
                    .with_amount(budget.remaining),
                );
            }
        }

        findings
    }
}
