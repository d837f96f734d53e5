//! Analysis command implementations
//!
//! Recurring detection, insights, the health score and the dashboard all run
//! against the same reference day so their output agrees.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use spendwise_core::{
    calculate_summary, compute_budgets, detect_recurring, format_currency, format_date,
    score_health, AnalysisContext, CategoryBudget, Config, Database, Expense, FinancialHealth,
    InsightEngine, InsightKind, SmartInsight,
};

use super::truncate;

/// Expenses plus this month's budget status
fn load_budgets(db: &Database, today: NaiveDate) -> Result<(Vec<Expense>, Vec<CategoryBudget>)> {
    let expenses = db.list_expenses()?;
    let categories = db.category_names()?;
    let settings = db.get_budget_settings()?;
    let budgets = compute_budgets(&expenses, &categories, &settings, today);
    Ok((expenses, budgets))
}

/// Run the insight engine with the configured forecast window
pub fn build_insights(
    db: &Database,
    config: &Config,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<Vec<SmartInsight>> {
    let (expenses, budgets) = load_budgets(db, today)?;
    let recurring = detect_recurring(&expenses);

    let ctx = AnalysisContext::new(&expenses, &budgets, &recurring, today, now)
        .with_upcoming_window(config.upcoming_window_days);
    Ok(InsightEngine::new().generate(&ctx))
}

pub fn build_health(db: &Database, today: NaiveDate) -> Result<FinancialHealth> {
    let (expenses, budgets) = load_budgets(db, today)?;
    let goals = db.list_goals()?;
    Ok(score_health(&expenses, &budgets, &goals, today))
}

fn insight_icon(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Warning => "⚠️ ",
        InsightKind::Tip => "💡",
        InsightKind::Achievement => "🏆",
        InsightKind::Prediction => "🔮",
    }
}

fn health_icon(health: &FinancialHealth) -> &'static str {
    match health.score {
        80.. => "💚",
        60..=79 => "💛",
        40..=59 => "🧡",
        _ => "❤️ ",
    }
}

pub fn cmd_recurring(db: &Database, today: NaiveDate) -> Result<()> {
    let expenses = db.list_expenses()?;
    let recurring = detect_recurring(&expenses);

    if recurring.is_empty() {
        println!("No recurring expenses detected yet.");
        println!("   Expenses that repeat with the same description at a steady interval show up here.");
        return Ok(());
    }

    println!();
    println!("🔁 Recurring Expenses");
    println!("   ─────────────────────────────────────────────────────────────");

    for item in &recurring {
        let days = (item.next_expected - today).num_days();
        let next = match days {
            d if d < 0 => format!("overdue since {}", format_date(item.next_expected)),
            0 => "due today".to_string(),
            d => format!("next {} (in {} days)", format_date(item.next_expected), d),
        };

        println!(
            "   {:20} │ {:>10}/{:<7} │ {:>3}% │ {}",
            truncate(&item.description, 20),
            format_currency(item.average_amount),
            item.frequency.as_str(),
            item.confidence,
            next
        );
    }

    let monthly: f64 = recurring
        .iter()
        .map(|r| match r.frequency {
            spendwise_core::Frequency::Daily => r.average_amount * 30.0,
            spendwise_core::Frequency::Weekly => r.average_amount * 52.0 / 12.0,
            spendwise_core::Frequency::Monthly => r.average_amount,
        })
        .sum();
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Estimated monthly cost: {}", format_currency(monthly));

    Ok(())
}

pub fn cmd_insights(
    db: &Database,
    config: &Config,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<()> {
    let insights = build_insights(db, config, today, now)?;

    if insights.is_empty() {
        println!("No insights right now. Keep tracking expenses to unlock them.");
        return Ok(());
    }

    println!();
    println!("✨ Smart Insights");
    println!("   ─────────────────────────────────────────────────────────────");

    for insight in &insights {
        println!("   {} {}", insight_icon(insight.kind), insight.title);
        println!("      {}", insight.message);
    }

    Ok(())
}

pub fn cmd_health(db: &Database, today: NaiveDate) -> Result<()> {
    let health = build_health(db, today)?;

    println!();
    println!(
        "{} Financial Health: {}/100 ({})",
        health_icon(&health),
        health.score,
        health.level
    );
    println!("   ─────────────────────────────");
    println!("   Budget adherence:  {:>5.1}", health.factors.budget_adherence);
    println!("   Savings rate:      {:>5.1}", health.factors.savings_rate);
    println!("   Spending trend:    {:>5.1}", health.factors.spending_trend);
    println!("   Category balance:  {:>5.1}", health.factors.category_balance);
    println!();
    println!("   Recommendations:");
    for rec in &health.recommendations {
        println!("   • {}", rec);
    }

    Ok(())
}

pub fn cmd_dashboard(
    db: &Database,
    config: &Config,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<()> {
    let expenses = db.list_expenses()?;
    let categories = db.category_names()?;
    let summary = calculate_summary(&expenses, &categories, today);
    let health = build_health(db, today)?;
    let insights = build_insights(db, config, today, now)?;

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│         💰 Spendwise Dashboard          │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  This month ({}):  {}", today.format("%B"), format_currency(summary.monthly_spending));
    println!("  All time:          {}", format_currency(summary.total_spending));
    println!("  Expenses:          {}", summary.expense_count);
    println!("  Average expense:   {}", format_currency(summary.average_expense));
    println!();

    let mut top: Vec<&(String, f64)> = summary
        .category_breakdown
        .iter()
        .filter(|(_, total)| *total > 0.0)
        .collect();
    top.sort_by(|a, b| b.1.total_cmp(&a.1));
    if !top.is_empty() {
        println!("  Top categories:");
        for (name, total) in top.iter().take(3) {
            println!("     {:16} {}", name, format_currency(*total));
        }
        println!();
    }

    println!(
        "  {} Health: {}/100 ({})",
        health_icon(&health),
        health.score,
        health.level
    );
    println!();

    if !insights.is_empty() {
        println!("  Insights:");
        for insight in insights.iter().take(3) {
            println!("     {} {}", insight_icon(insight.kind), insight.title);
        }
        if insights.len() > 3 {
            println!();
            println!("  Run 'spendwise insights' to see all {}.", insights.len());
        }
    }

    Ok(())
}
