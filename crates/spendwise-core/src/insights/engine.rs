//! Insight engine - runs the registered rules and orders their findings

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{CategoryBudget, Expense, RecurringExpense};
use crate::period;

use super::types::{Finding, SmartInsight};
use super::{
    BudgetAlertInsight, BudgetMasteryInsight, ExpenseForecasterInsight, SpendingTrendInsight,
    TopCategoryInsight,
};

/// Default look-ahead for upcoming recurring expenses
pub const DEFAULT_UPCOMING_WINDOW_DAYS: i64 = 7;

/// Context provided to insight rules
pub struct AnalysisContext<'a> {
    pub expenses: &'a [Expense],
    pub budgets: &'a [CategoryBudget],
    pub recurring: &'a [RecurringExpense],
    /// Reference day for month boundaries and the forecast window
    pub today: NaiveDate,
    /// Timestamp stamped on generated insights
    pub now: DateTime<Utc>,
    /// Days ahead (inclusive) that count as "upcoming"
    pub upcoming_window_days: i64,
    pub this_month_total: f64,
    pub last_month_total: f64,
    pub this_month_count: usize,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        expenses: &'a [Expense],
        budgets: &'a [CategoryBudget],
        recurring: &'a [RecurringExpense],
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            expenses,
            budgets,
            recurring,
            today,
            now,
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
            this_month_total: period::month_total(expenses, today),
            last_month_total: period::month_total(expenses, period::previous_month(today)),
            this_month_count: period::in_month(expenses, today).count(),
        }
    }

    /// Context whose reference day is the UTC date of `now`
    pub fn at(
        expenses: &'a [Expense],
        budgets: &'a [CategoryBudget],
        recurring: &'a [RecurringExpense],
        now: DateTime<Utc>,
    ) -> Self {
        Self::new(expenses, budgets, recurring, now.date_naive(), now)
    }

    pub fn with_upcoming_window(mut self, days: i64) -> Self {
        self.upcoming_window_days = days;
        self
    }

    /// Month-over-month change in percent, `None` without prior-month spending
    pub fn month_over_month_change(&self) -> Option<f64> {
        if self.last_month_total > 0.0 {
            Some((self.this_month_total - self.last_month_total) / self.last_month_total * 100.0)
        } else {
            None
        }
    }
}

/// Trait for insight rules
pub trait Insight: Send + Sync {
    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and produce zero or more findings
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding>;
}

/// The main insight engine
pub struct InsightEngine {
    insights: Vec<Box<dyn Insight>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules in evaluation order
    pub fn new() -> Self {
        let mut engine = Self { insights: vec![] };

        engine.register(Box::new(BudgetAlertInsight));
        engine.register(Box::new(SpendingTrendInsight));
        engine.register(Box::new(ExpenseForecasterInsight));
        engine.register(Box::new(BudgetMasteryInsight));
        engine.register(Box::new(TopCategoryInsight));

        engine
    }

    /// Register a rule; it runs after every rule registered before it
    pub fn register(&mut self, insight: Box<dyn Insight>) {
        self.insights.push(insight);
    }

    /// Run every rule and return insights, highest priority first
    ///
    /// Equal priorities keep rule evaluation order.
    pub fn generate(&self, ctx: &AnalysisContext<'_>) -> Vec<SmartInsight> {
        let mut insights = Vec::new();

        for rule in &self.insights {
            let findings = rule.analyze(ctx);
            tracing::debug!(rule = rule.name(), count = findings.len(), "Insight rule evaluated");

            for finding in findings {
                let id = format!("insight-{}", insights.len());
                insights.push(SmartInsight::from_finding(finding, id, ctx.now));
            }
        }

        // sort_by is stable, so ties stay in generation order
        insights.sort_by(|a, b| b.priority.cmp(&a.priority));

        insights
    }

    /// Names of registered rules, in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.insights.iter().map(|i| i.name()).collect()
    }
}

/// Generate insights with the built-in rules
pub fn generate_insights(
    expenses: &[Expense],
    budgets: &[CategoryBudget],
    recurring: &[RecurringExpense],
    now: DateTime<Utc>,
) -> Vec<SmartInsight> {
    let ctx = AnalysisContext::at(expenses, budgets, recurring, now);
    InsightEngine::new().generate(&ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::types::InsightKind;
    use crate::test_utils::{at_noon, budget, date, expense};

    struct FixedRule(u8, &'static str);

    impl Insight for FixedRule {
        fn name(&self) -> &'static str {
            self.1
        }

        fn analyze(&self, _ctx: &AnalysisContext<'_>) -> Vec<Finding> {
            vec![Finding::new(InsightKind::Tip, self.0, self.1, "")]
        }
    }

    #[test]
    fn test_engine_rule_order() {
        let engine = InsightEngine::new();
        assert_eq!(
            engine.rule_names(),
            vec![
                "Budget Alerts",
                "Spending Trend",
                "Expense Forecaster",
                "Budget Mastery",
                "Top Category"
            ]
        );
    }

    #[test]
    fn test_empty_input_produces_nothing() {
        let now = at_noon(date(2024, 3, 15));
        assert!(generate_insights(&[], &[], &[], now).is_empty());
    }

    #[test]
    fn test_stable_priority_sort_and_sequential_ids() {
        let mut engine = InsightEngine { insights: vec![] };
        engine.register(Box::new(FixedRule(2, "first-low")));
        engine.register(Box::new(FixedRule(5, "high")));
        engine.register(Box::new(FixedRule(2, "second-low")));

        let now = at_noon(date(2024, 3, 15));
        let ctx = AnalysisContext::at(&[], &[], &[], now);
        let insights = engine.generate(&ctx);

        let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["high", "first-low", "second-low"]);
        assert_eq!(insights[0].id, "insight-1");
        assert_eq!(insights[1].id, "insight-0");
        assert!(insights.iter().all(|i| i.date == now));
    }

    #[test]
    fn test_context_month_totals() {
        let expenses = vec![
            expense("a", 100.0, "Food", date(2024, 3, 1)),
            expense("b", 50.0, "Food", date(2024, 3, 31)),
            expense("c", 75.0, "Food", date(2024, 2, 10)),
            expense("d", 999.0, "Food", date(2023, 3, 10)),
        ];
        let ctx = AnalysisContext::new(&expenses, &[], &[], date(2024, 3, 15), at_noon(date(2024, 3, 15)));

        assert_eq!(ctx.this_month_total, 150.0);
        assert_eq!(ctx.last_month_total, 75.0);
        assert_eq!(ctx.this_month_count, 2);
        assert_eq!(ctx.month_over_month_change(), Some(100.0));
    }

    #[test]
    fn test_idempotent_for_fixed_clock() {
        let expenses = vec![expense("Concert", 120.0, "Entertainment", date(2024, 3, 5))];
        let budgets = vec![budget("Entertainment", 100.0, 120.0)];
        let now = at_noon(date(2024, 3, 15));

        let first = generate_insights(&expenses, &budgets, &[], now);
        let second = generate_insights(&expenses, &budgets, &[], now);
        assert_eq!(first, second);
    }
}
