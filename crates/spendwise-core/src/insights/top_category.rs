//! Top Category Insight
//!
//! Points at the single highest-spending category when it holds more than 40%
//! of this month's total spending.

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightKind};

const TOP_CATEGORY_SHARE: f64 = 0.4;

pub struct TopCategoryInsight;

impl Insight for TopCategoryInsight {
    fn name(&self) -> &'static str {
        "Top Category"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        // First budget wins on ties
        let top = ctx
            .budgets
            .iter()
            .filter(|b| b.spent > 0.0)
            .fold(None, |best: Option<&crate::models::CategoryBudget>, b| match best {
                Some(current) if current.spent >= b.spent => Some(current),
                _ => Some(b),
            });

        let Some(top) = top else {
            return vec![];
        };

        if top.spent <= ctx.this_month_total * TOP_CATEGORY_SHARE {
            return vec![];
        }

        vec![Finding::new(
            InsightKind::Tip,
            2,
            format!("{} is Your Top Expense", top.category),
            format!(
                "{} accounts for {:.0}% of your spending. Look for opportunities to optimize this category.",
                top.category,
                top.spent / ctx.this_month_total * 100.0
            ),
        )
        .with_category(&top.category)
        .with_amount(top.spent)]
    }
}
