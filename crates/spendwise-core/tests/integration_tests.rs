//! Integration tests for spendwise-core
//!
//! These tests exercise the full store → budgets → recurring → insights →
//! health workflow against an in-memory database.

use chrono::{NaiveDate, TimeZone, Utc};
use spendwise_core::test_utils::{date, new_expense};
use spendwise_core::{
    compute_budgets, detect_recurring, generate_insights, score_health, Database, Frequency,
    HealthLevel, InsightKind,
};

fn add(db: &Database, description: &str, amount: f64, category: &str, on: NaiveDate) {
    db.add_expense(&new_expense(description, amount, category, on))
        .expect("Failed to add expense");
}

// =============================================================================
// Engine Scenarios
// =============================================================================

#[test]
fn test_two_monthly_charges_are_recurring() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    add(&db, "Netflix", 15.0, "Entertainment", date(2024, 1, 1));
    add(&db, "Netflix", 15.0, "Entertainment", date(2024, 2, 1));

    let recurring = detect_recurring(&db.list_expenses().unwrap());

    assert_eq!(recurring.len(), 1);
    assert_eq!(recurring[0].frequency, Frequency::Monthly);
    assert_eq!(recurring[0].confidence, 100);
    assert_eq!(recurring[0].occurrences, 2);
    assert_eq!(recurring[0].average_amount, 15.0);
}

#[test]
fn test_overspent_category_raises_top_priority_warning() {
    let db = Database::in_memory().unwrap();
    db.set_budget_limit("Entertainment", 100.0).unwrap();
    add(&db, "Concert", 120.0, "Entertainment", date(2024, 3, 5));

    let expenses = db.list_expenses().unwrap();
    let categories = db.category_names().unwrap();
    let settings = db.get_budget_settings().unwrap();
    let budgets = compute_budgets(&expenses, &categories, &settings, date(2024, 3, 15));

    let entertainment = budgets
        .iter()
        .find(|b| b.category == "Entertainment")
        .unwrap();
    assert_eq!(entertainment.percentage_used, 120.0);
    assert_eq!(entertainment.remaining, -20.0);

    let now = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
    let insights = generate_insights(&expenses, &budgets, &[], now);

    assert_eq!(insights[0].kind, InsightKind::Warning);
    assert_eq!(insights[0].priority, 5);
    assert_eq!(insights[0].title, "Entertainment Budget Exceeded!");
    assert!(insights.iter().all(|i| i.date == now));
}

#[test]
fn test_no_limits_scores_full_adherence_and_zero_savings() {
    let db = Database::in_memory().unwrap();
    add(&db, "Lunch", 20.0, "Food", date(2024, 3, 2));

    let expenses = db.list_expenses().unwrap();
    let categories = db.category_names().unwrap();
    let budgets = compute_budgets(
        &expenses,
        &categories,
        &db.get_budget_settings().unwrap(),
        date(2024, 3, 15),
    );
    let health = score_health(&expenses, &budgets, &db.list_goals().unwrap(), date(2024, 3, 15));

    assert_eq!(health.factors.budget_adherence, 100.0);
    assert_eq!(health.factors.savings_rate, 0.0);
}

#[test]
fn test_doubled_spending_flows_into_insight_and_health() {
    let db = Database::in_memory().unwrap();
    add(&db, "Rent", 500.0, "Bills", date(2024, 2, 1));
    add(&db, "Rent", 1000.0, "Bills", date(2024, 3, 1));

    let expenses = db.list_expenses().unwrap();
    let categories = db.category_names().unwrap();
    let budgets = compute_budgets(
        &expenses,
        &categories,
        &db.get_budget_settings().unwrap(),
        date(2024, 3, 15),
    );

    let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
    let insights = generate_insights(&expenses, &budgets, &[], now);
    assert!(insights
        .iter()
        .any(|i| i.title == "Spending Increased Significantly"));

    let health = score_health(&expenses, &budgets, &[], date(2024, 3, 15));
    assert_eq!(health.factors.spending_trend, 0.0);
}

#[test]
fn test_insight_order_is_priority_then_rule_order() {
    let db = Database::in_memory().unwrap();
    db.set_budget_limit("Food", 100.0).unwrap();
    db.set_budget_limit("Shopping", 100.0).unwrap();

    // Food at 85% (warning, 4), Shopping over (exceeded, 5)
    add(&db, "Groceries", 85.0, "Food", date(2024, 3, 2));
    add(&db, "Jacket", 150.0, "Shopping", date(2024, 3, 3));
    // Spending doubled (trend warning, 4)
    add(&db, "Groceries", 100.0, "Food", date(2024, 2, 2));
    // Gym every 30 days, due within the week (prediction, 3)
    add(&db, "Gym", 40.0, "Other", date(2024, 1, 14));
    add(&db, "Gym", 40.0, "Other", date(2024, 2, 13));

    let expenses = db.list_expenses().unwrap();
    let categories = db.category_names().unwrap();
    let budgets = compute_budgets(
        &expenses,
        &categories,
        &db.get_budget_settings().unwrap(),
        date(2024, 3, 10),
    );
    let recurring = detect_recurring(&expenses);
    let gym = recurring.iter().find(|r| r.description == "Gym").unwrap();
    assert_eq!(gym.next_expected, date(2024, 3, 14));

    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
    let insights = generate_insights(&expenses, &budgets, &recurring, now);
    let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();

    assert_eq!(
        titles,
        vec![
            "Shopping Budget Exceeded!",
            "Food Budget Warning",
            "Spending Increased Significantly",
            "Upcoming Recurring Expenses",
            "Shopping is Your Top Expense",
        ]
    );

    let priorities: Vec<u8> = insights.iter().map(|i| i.priority).collect();
    assert!(priorities.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_engine_is_idempotent() {
    let db = Database::in_memory().unwrap();
    for day in 1..=7 {
        add(&db, "Coffee", 4.0, "Food", date(2024, 3, day));
    }

    let expenses = db.list_expenses().unwrap();
    let categories = db.category_names().unwrap();
    let settings = db.get_budget_settings().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 3, 8, 8, 0, 0).unwrap();

    let run = || {
        let budgets = compute_budgets(&expenses, &categories, &settings, now.date_naive());
        let recurring = detect_recurring(&expenses);
        let insights = generate_insights(&expenses, &budgets, &recurring, now);
        let health = score_health(&expenses, &budgets, &[], now.date_naive());
        (budgets, recurring, insights, health)
    };

    assert_eq!(run(), run());
}

#[test]
fn test_custom_category_gets_a_budget_row() {
    let db = Database::in_memory().unwrap();
    db.add_category("Pets", "🐶", "#22c55e").unwrap();
    db.set_budget_limit("Pets", 50.0).unwrap();
    add(&db, "Dog food", 30.0, "pets", date(2024, 3, 3));

    let expenses = db.list_expenses().unwrap();
    let categories = db.category_names().unwrap();
    let budgets = compute_budgets(
        &expenses,
        &categories,
        &db.get_budget_settings().unwrap(),
        date(2024, 3, 20),
    );

    assert_eq!(budgets.len(), 7);
    let pets = budgets.last().unwrap();
    assert_eq!(pets.category, "Pets");
    assert_eq!(pets.spent, 30.0);
    assert_eq!(pets.percentage_used, 60.0);
}

#[test]
fn test_healthy_month_is_excellent() {
    let db = Database::in_memory().unwrap();
    db.set_budget_limit("Food", 400.0).unwrap();
    db.set_budget_limit("Transportation", 200.0).unwrap();
    add(&db, "Groceries", 300.0, "Food", date(2024, 2, 3));
    add(&db, "Groceries", 100.0, "Food", date(2024, 3, 3));
    add(&db, "Bus", 50.0, "Transportation", date(2024, 3, 4));

    let expenses = db.list_expenses().unwrap();
    let categories = db.category_names().unwrap();
    let budgets = compute_budgets(
        &expenses,
        &categories,
        &db.get_budget_settings().unwrap(),
        date(2024, 3, 20),
    );
    let health = score_health(&expenses, &budgets, &[], date(2024, 3, 20));

    assert_eq!(health.level, HealthLevel::Excellent);
    assert_eq!(
        health.recommendations,
        vec!["Great job! Keep maintaining your excellent financial habits.".to_string()]
    );
}
