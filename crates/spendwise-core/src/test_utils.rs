//! Test fixtures shared by the unit tests

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::models::{CategoryBudget, Expense, NewExpense};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Noon UTC on the given day
pub fn at_noon(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
}

/// Build an expense with a unique id
pub fn expense(description: &str, amount: f64, category: &str, on: NaiveDate) -> Expense {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let stamp = at_noon(on);
    Expense {
        id: format!("test-{}", COUNTER.fetch_add(1, Ordering::SeqCst)),
        date: on,
        amount,
        category: category.to_string(),
        description: description.to_string(),
        created_at: stamp,
        updated_at: stamp,
    }
}

pub fn new_expense(description: &str, amount: f64, category: &str, on: NaiveDate) -> NewExpense {
    NewExpense {
        date: on,
        amount,
        category: category.to_string(),
        description: description.to_string(),
    }
}

/// Budget entry with derived fields filled in
pub fn budget(category: &str, monthly_limit: f64, spent: f64) -> CategoryBudget {
    CategoryBudget {
        category: category.to_string(),
        monthly_limit,
        spent,
        remaining: monthly_limit - spent,
        percentage_used: if monthly_limit > 0.0 {
            spent / monthly_limit * 100.0
        } else {
            0.0
        },
    }
}
