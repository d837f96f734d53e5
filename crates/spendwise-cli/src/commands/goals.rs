//! Savings goal command implementations

use anyhow::Result;
use chrono::NaiveDate;
use spendwise_core::{format_currency, format_date, Database, GoalPriority, NewSavingsGoal};

use super::truncate;

pub fn cmd_goals_list(db: &Database, today: NaiveDate) -> Result<()> {
    let goals = db.list_goals()?;

    if goals.is_empty() {
        println!("No savings goals yet. Add one with:");
        println!("  spendwise goals add \"Vacation\" 2000 --deadline 2025-06-01");
        return Ok(());
    }

    println!();
    println!("🎯 Savings Goals");
    println!("   ─────────────────────────────────────────────────────────────");

    for goal in goals {
        let days_left = (goal.deadline - today).num_days();
        let due = if days_left < 0 {
            "overdue".to_string()
        } else {
            format!("{} days left", days_left)
        };

        println!(
            "   {:20} │ {:>10} / {:<10} │ {:>5.1}% │ {} ({}) │ {}",
            truncate(&goal.name, 20),
            format_currency(goal.current_amount),
            format_currency(goal.target_amount),
            goal.progress_percent(),
            format_date(goal.deadline),
            due,
            goal.priority
        );
        println!("   {:20}   [{}]", "", goal.id);
    }

    Ok(())
}

pub fn cmd_goals_add(
    db: &Database,
    name: &str,
    target: f64,
    deadline: NaiveDate,
    current: f64,
    category: Option<&str>,
    priority: GoalPriority,
) -> Result<()> {
    let category = match category {
        Some(name) => Some(
            db.get_category_by_name(name)?
                .map(|c| c.name)
                .ok_or_else(|| anyhow::anyhow!("Unknown category: {}", name))?,
        ),
        None => None,
    };

    let goal = db.add_goal(&NewSavingsGoal {
        name: name.to_string(),
        target_amount: target,
        current_amount: current,
        deadline,
        category,
        priority,
    })?;

    println!(
        "✅ Added goal {}: save {} by {}",
        goal.name,
        format_currency(goal.target_amount),
        format_date(goal.deadline)
    );
    println!("   ID: {}", goal.id);
    Ok(())
}

pub fn cmd_goals_progress(db: &Database, id: &str, amount: f64) -> Result<()> {
    let goal = db.update_goal_progress(id, amount)?;
    println!(
        "✅ {}: {} of {} ({:.1}%)",
        goal.name,
        format_currency(goal.current_amount),
        format_currency(goal.target_amount),
        goal.progress_percent()
    );
    if goal.progress_percent() >= 100.0 {
        println!("   🎉 Goal reached!");
    }
    Ok(())
}

pub fn cmd_goals_delete(db: &Database, id: &str) -> Result<()> {
    if !db.delete_goal(id)? {
        anyhow::bail!("Savings goal not found: {}", id);
    }
    println!("✅ Deleted goal {}", id);
    Ok(())
}
