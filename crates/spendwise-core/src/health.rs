//! Financial health scoring
//!
//! Four factors, each normalized to 0-100, combine into a weighted score:
//!
//! | Factor            | Weight | Source                                      |
//! |-------------------|--------|---------------------------------------------|
//! | budget adherence  | 0.35   | average usage of limited budgets            |
//! | savings rate      | 0.30   | unspent share of the total monthly budget   |
//! | spending trend    | 0.20   | month-over-month change                     |
//! | category balance  | 0.15   | whether spending spans several categories   |

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{
    CategoryBudget, Expense, FinancialHealth, HealthFactors, HealthLevel, SavingsGoal,
};
use crate::period;

const ADHERENCE_WEIGHT: f64 = 0.35;
const SAVINGS_WEIGHT: f64 = 0.30;
const TREND_WEIGHT: f64 = 0.20;
const BALANCE_WEIGHT: f64 = 0.15;

/// Average usage above this starts costing adherence points
const ADHERENCE_PENALTY_START: f64 = 70.0;
const NEUTRAL_TREND: f64 = 50.0;
const BALANCED_SCORE: f64 = 80.0;
const CONCENTRATED_SCORE: f64 = 50.0;

/// Factor score below which its recommendation is emitted
const RECOMMENDATION_THRESHOLD: f64 = 50.0;
const ADHERENCE_RECOMMENDATION_THRESHOLD: f64 = 70.0;

const ADHERENCE_MESSAGE: &str = "Consider reviewing and adjusting your category budgets to better match your spending patterns.";
const SAVINGS_MESSAGE: &str =
    "Try to increase your savings rate by reducing discretionary spending.";
const TREND_MESSAGE: &str =
    "Your spending is trending upward. Look for areas where you can cut back.";
const BALANCE_MESSAGE: &str =
    "Your spending is concentrated in few categories. Diversifying can reduce risk.";
const HEALTHY_MESSAGE: &str = "Great job! Keep maintaining your excellent financial habits.";

/// Score overall financial health for the month containing `reference`
///
/// `goals` is accepted for future use and does not affect the score.
pub fn score_health(
    expenses: &[Expense],
    budgets: &[CategoryBudget],
    _goals: &[SavingsGoal],
    reference: NaiveDate,
) -> FinancialHealth {
    let this_month = period::month_total(expenses, reference);
    let last_month = period::month_total(expenses, period::previous_month(reference));

    let factors = HealthFactors {
        budget_adherence: budget_adherence(budgets),
        savings_rate: savings_rate(budgets, this_month),
        spending_trend: spending_trend(this_month, last_month),
        category_balance: category_balance(budgets),
    };

    let weighted = factors.budget_adherence * ADHERENCE_WEIGHT
        + factors.savings_rate * SAVINGS_WEIGHT
        + factors.spending_trend * TREND_WEIGHT
        + factors.category_balance * BALANCE_WEIGHT;
    let score = weighted.round().clamp(0.0, 100.0) as u8;

    debug!(
        score,
        adherence = factors.budget_adherence,
        savings = factors.savings_rate,
        trend = factors.spending_trend,
        balance = factors.category_balance,
        "Scored financial health"
    );

    FinancialHealth {
        score,
        level: HealthLevel::from_score(score),
        recommendations: recommendations(&factors),
        factors,
    }
}

fn budget_adherence(budgets: &[CategoryBudget]) -> f64 {
    let limited: Vec<&CategoryBudget> = budgets.iter().filter(|b| b.monthly_limit > 0.0).collect();
    if limited.is_empty() {
        return 100.0;
    }

    let avg_usage = limited
        .iter()
        .map(|b| b.percentage_used.min(100.0))
        .sum::<f64>()
        / limited.len() as f64;

    // Capped at 100 on purpose: light usage would otherwise score above 100
    (100.0 - (avg_usage - ADHERENCE_PENALTY_START)).clamp(0.0, 100.0)
}

fn savings_rate(budgets: &[CategoryBudget], spent: f64) -> f64 {
    let total_budget: f64 = budgets.iter().map(|b| b.monthly_limit).sum();
    if total_budget <= 0.0 {
        return 0.0;
    }

    // Doubled so that keeping half the budget scores 100
    ((total_budget - spent) / total_budget * 100.0 * 2.0).clamp(0.0, 100.0)
}

fn spending_trend(this_month: f64, last_month: f64) -> f64 {
    if last_month <= 0.0 {
        return NEUTRAL_TREND;
    }

    let change = (this_month - last_month) / last_month * 100.0;
    (NEUTRAL_TREND - change).clamp(0.0, 100.0)
}

fn category_balance(budgets: &[CategoryBudget]) -> f64 {
    if budgets.iter().filter(|b| b.spent > 0.0).count() > 1 {
        BALANCED_SCORE
    } else {
        CONCENTRATED_SCORE
    }
}

fn recommendations(factors: &HealthFactors) -> Vec<String> {
    let mut out = Vec::new();

    if factors.budget_adherence < ADHERENCE_RECOMMENDATION_THRESHOLD {
        out.push(ADHERENCE_MESSAGE.to_string());
    }
    if factors.savings_rate < RECOMMENDATION_THRESHOLD {
        out.push(SAVINGS_MESSAGE.to_string());
    }
    if factors.spending_trend < RECOMMENDATION_THRESHOLD {
        out.push(TREND_MESSAGE.to_string());
    }
    if factors.category_balance < RECOMMENDATION_THRESHOLD {
        out.push(BALANCE_MESSAGE.to_string());
    }

    if out.is_empty() {
        out.push(HEALTHY_MESSAGE.to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{budget, date, expense};

    #[test]
    fn test_no_limits_set() {
        let expenses = vec![expense("Lunch", 20.0, "Food", date(2024, 3, 5))];
        let budgets = vec![budget("Food", 0.0, 20.0), budget("Bills", 0.0, 0.0)];

        let health = score_health(&expenses, &budgets, &[], date(2024, 3, 15));

        assert_eq!(health.factors.budget_adherence, 100.0);
        assert_eq!(health.factors.savings_rate, 0.0);
        assert_eq!(health.factors.spending_trend, 50.0);
        assert_eq!(health.factors.category_balance, 50.0);
        // 35 + 0 + 10 + 7.5
        assert!((52..=53).contains(&health.score));
        assert_eq!(health.level, HealthLevel::Fair);
        assert_eq!(health.recommendations, vec![SAVINGS_MESSAGE.to_string()]);
    }

    #[test]
    fn test_doubled_spending_zeroes_trend() {
        let expenses = vec![
            expense("Rent", 1000.0, "Bills", date(2024, 3, 1)),
            expense("Rent", 500.0, "Bills", date(2024, 2, 1)),
        ];
        let health = score_health(&expenses, &[], &[], date(2024, 3, 15));

        assert_eq!(health.factors.spending_trend, 0.0);
        assert!(health.recommendations.contains(&TREND_MESSAGE.to_string()));
    }

    #[test]
    fn test_adherence_penalty_starts_at_seventy() {
        let at_seventy = vec![budget("Food", 100.0, 70.0)];
        assert_eq!(budget_adherence(&at_seventy), 100.0);

        let light = vec![budget("Food", 100.0, 10.0)];
        assert_eq!(budget_adherence(&light), 100.0);

        let over = vec![budget("Food", 100.0, 250.0), budget("Bills", 100.0, 80.0)];
        // Usage capped at 100: avg 90 -> 80
        assert_eq!(budget_adherence(&over), 80.0);
    }

    #[test]
    fn test_savings_rate_doubles_and_clamps() {
        let budgets = vec![budget("Food", 200.0, 0.0), budget("Bills", 200.0, 0.0)];
        assert_eq!(savings_rate(&budgets, 300.0), 50.0);
        assert_eq!(savings_rate(&budgets, 100.0), 100.0);
        assert_eq!(savings_rate(&budgets, 500.0), 0.0);
    }

    #[test]
    fn test_healthy_household() {
        let expenses = vec![
            expense("Groceries", 100.0, "Food", date(2024, 3, 3)),
            expense("Bus", 50.0, "Transportation", date(2024, 3, 4)),
            expense("Groceries", 300.0, "Food", date(2024, 2, 3)),
        ];
        let budgets = vec![
            budget("Food", 400.0, 100.0),
            budget("Transportation", 200.0, 50.0),
        ];

        let health = score_health(&expenses, &budgets, &[], date(2024, 3, 20));

        assert_eq!(health.factors.budget_adherence, 100.0);
        assert_eq!(health.factors.savings_rate, 100.0);
        assert_eq!(health.factors.spending_trend, 100.0);
        assert_eq!(health.factors.category_balance, 80.0);
        assert_eq!(health.score, 97);
        assert_eq!(health.level, HealthLevel::Excellent);
        assert_eq!(health.recommendations, vec![HEALTHY_MESSAGE.to_string()]);
    }

    #[test]
    fn test_recommendations_keep_factor_order() {
        let factors = HealthFactors {
            budget_adherence: 10.0,
            savings_rate: 10.0,
            spending_trend: 10.0,
            category_balance: 10.0,
        };
        assert_eq!(
            recommendations(&factors),
            vec![
                ADHERENCE_MESSAGE.to_string(),
                SAVINGS_MESSAGE.to_string(),
                TREND_MESSAGE.to_string(),
                BALANCE_MESSAGE.to_string(),
            ]
        );
    }
}
