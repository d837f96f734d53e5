//! Expense command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use spendwise_core::{
    filter_expenses, format_currency, validate_expense_form, Database, ExpenseFilters, NewExpense,
};

use super::{resolve_categories, truncate};

pub fn cmd_add(
    db: &Database,
    amount: &str,
    description: &str,
    category: &str,
    date: Option<&str>,
    today: NaiveDate,
) -> Result<()> {
    let today_str = today.format("%Y-%m-%d").to_string();
    let date = date.unwrap_or(&today_str);

    let errors = validate_expense_form(amount, description, date);
    if !errors.is_valid() {
        for (field, message) in errors.fields() {
            eprintln!("   ❌ {}: {}", field, message);
        }
    }
    errors.into_result()?;

    let new = NewExpense {
        date: NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")?,
        amount: amount.trim().parse()?,
        category: category.to_string(),
        description: description.to_string(),
    };
    let expense = db.add_expense(&new).context("Failed to add expense")?;

    println!(
        "✅ Added {} for {} ({}) on {}",
        format_currency(expense.amount),
        expense.description,
        expense.category,
        expense.date
    );
    println!("   ID: {}", expense.id);

    Ok(())
}

pub fn cmd_list(
    db: &Database,
    filters: &ExpenseFilters,
    today: NaiveDate,
    limit: usize,
) -> Result<()> {
    let mut filters = filters.clone();
    filters.categories = resolve_categories(db, &filters.categories)?;

    let expenses = db.list_expenses()?;
    if expenses.is_empty() {
        println!("No expenses recorded yet. Add one with:");
        println!("  spendwise add 12.50 \"Lunch\" --category Food");
        return Ok(());
    }

    let mut matched = filter_expenses(&expenses, &filters, today);
    if matched.is_empty() {
        println!("No expenses match the selected filters.");
        return Ok(());
    }
    matched.sort_by(|a, b| b.date.cmp(&a.date));

    let total: f64 = matched.iter().map(|e| e.amount).sum();

    println!();
    println!("📝 Expenses");
    println!("   ─────────────────────────────────────────────────────────────");

    for expense in matched.iter().take(limit) {
        println!(
            "   {} │ {:>10} │ {:14} │ {}",
            expense.date,
            format_currency(expense.amount),
            truncate(&expense.category, 14),
            truncate(&expense.description, 30)
        );
        println!("   {:>10}   [{}]", "", expense.id);
    }

    println!("   ─────────────────────────────────────────────────────────────");
    if matched.len() > limit {
        println!("   Showing {} of {} expenses", limit, matched.len());
    }
    println!("   Total: {} across {} expenses", format_currency(total), matched.len());

    Ok(())
}

pub fn cmd_edit(
    db: &Database,
    id: &str,
    amount: Option<f64>,
    description: Option<&str>,
    category: Option<&str>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let existing = db
        .get_expense(id)?
        .ok_or_else(|| anyhow::anyhow!("Expense not found: {}", id))?;

    let update = NewExpense {
        date: date.unwrap_or(existing.date),
        amount: amount.unwrap_or(existing.amount),
        category: category.unwrap_or(&existing.category).to_string(),
        description: description.unwrap_or(&existing.description).to_string(),
    };
    let updated = db.update_expense(id, &update)?;

    println!(
        "✅ Updated expense {}: {} for {} ({}) on {}",
        updated.id,
        format_currency(updated.amount),
        updated.description,
        updated.category,
        updated.date
    );

    Ok(())
}

pub fn cmd_delete(db: &Database, id: &str) -> Result<()> {
    if !db.delete_expense(id)? {
        anyhow::bail!("Expense not found: {}", id);
    }
    println!("✅ Deleted expense {}", id);
    Ok(())
}

pub fn cmd_clear(db: &Database, yes: bool) -> Result<()> {
    let count = db.list_expenses()?.len();

    if !yes {
        anyhow::bail!(
            "This would delete all {} expenses. Re-run with --yes to confirm.",
            count
        );
    }

    db.clear_expenses()?;
    println!("🗑️  Deleted {} expenses", count);
    Ok(())
}
