//! Calendar-month helpers shared by the engine and reports

use chrono::{Datelike, NaiveDate};

use crate::models::Expense;

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

/// First day of the month before the one containing `date`
pub fn previous_month(date: NaiveDate) -> NaiveDate {
    month_start(month_start(date).pred_opt().unwrap_or(date))
}

/// True when both dates fall in the same calendar month and year
pub fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

/// Expenses dated in the reference month
pub fn in_month(expenses: &[Expense], reference: NaiveDate) -> impl Iterator<Item = &Expense> {
    expenses.iter().filter(move |e| same_month(e.date, reference))
}

/// Sum of amounts dated in the reference month
pub fn month_total(expenses: &[Expense], reference: NaiveDate) -> f64 {
    in_month(expenses, reference).map(|e| e.amount).sum()
}
