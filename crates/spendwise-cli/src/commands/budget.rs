//! Budget command implementations

use anyhow::Result;
use chrono::NaiveDate;
use spendwise_core::{compute_budgets, format_currency, Database};

pub fn cmd_budget_show(db: &Database, today: NaiveDate) -> Result<()> {
    let expenses = db.list_expenses()?;
    let categories = db.category_names()?;
    let settings = db.get_budget_settings()?;
    let budgets = compute_budgets(&expenses, &categories, &settings, today);

    println!();
    println!(
        "💰 Budgets for {} ({})",
        today.format("%B %Y"),
        settings.currency
    );
    println!("   ─────────────────────────────────────────────────────────────");

    for budget in &budgets {
        if budget.monthly_limit <= 0.0 {
            println!(
                "   {:16} │ {:>10} spent │ no limit",
                budget.category,
                format_currency(budget.spent)
            );
            continue;
        }

        let icon = if budget.percentage_used > 100.0 {
            "🚨"
        } else if budget.percentage_used >= 80.0 {
            "⚠️ "
        } else {
            "✅"
        };
        println!(
            "   {:16} │ {:>10} of {:>10} │ {} {:>5.1}% │ {} left",
            budget.category,
            format_currency(budget.spent),
            format_currency(budget.monthly_limit),
            icon,
            budget.percentage_used,
            format_currency(budget.remaining)
        );
    }

    let total_limit = settings.total_limit();
    if total_limit > 0.0 {
        let total_spent: f64 = budgets.iter().map(|b| b.spent).sum();
        println!("   ─────────────────────────────────────────────────────────────");
        println!(
            "   Total: {} of {}",
            format_currency(total_spent),
            format_currency(total_limit)
        );
    }

    Ok(())
}

pub fn cmd_budget_set(db: &Database, category: &str, limit: f64) -> Result<()> {
    let settings = db.set_budget_limit(category, limit)?;
    let name = settings
        .budgets
        .keys()
        .find(|k| k.eq_ignore_ascii_case(category))
        .map(String::as_str)
        .unwrap_or(category);

    if limit == 0.0 {
        println!("✅ Removed the monthly limit for {}", name);
    } else {
        println!("✅ {} limit set to {}/month", name, format_currency(limit));
    }
    Ok(())
}

pub fn cmd_budget_currency(db: &Database, code: &str) -> Result<()> {
    let settings = db.set_currency(code)?;
    println!("✅ Currency set to {}", settings.currency);
    Ok(())
}
