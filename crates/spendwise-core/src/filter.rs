//! Expense list filtering
//!
//! [`ExpenseFilters`] combines category, date, amount and free-text criteria.
//! Every criterion is optional; an empty filter matches everything.

use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Expense;
use crate::period;

/// Named date ranges relative to a reference day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DatePreset {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    Last7Days,
    Last30Days,
    Last90Days,
    ThisYear,
    LastYear,
    #[default]
    Custom,
}

impl DatePreset {
    pub const ALL: [DatePreset; 12] = [
        Self::Today,
        Self::Yesterday,
        Self::ThisWeek,
        Self::LastWeek,
        Self::ThisMonth,
        Self::LastMonth,
        Self::Last7Days,
        Self::Last30Days,
        Self::Last90Days,
        Self::ThisYear,
        Self::LastYear,
        Self::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::ThisWeek => "thisWeek",
            Self::LastWeek => "lastWeek",
            Self::ThisMonth => "thisMonth",
            Self::LastMonth => "lastMonth",
            Self::Last7Days => "last7Days",
            Self::Last30Days => "last30Days",
            Self::Last90Days => "last90Days",
            Self::ThisYear => "thisYear",
            Self::LastYear => "lastYear",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for DatePreset {
    type Err = String;

    /// Accepts `thisWeek`, `this-week` and `this_week` alike
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        Self::ALL
            .into_iter()
            .find(|p| p.as_str().to_lowercase() == wanted)
            .ok_or_else(|| format!("Unknown date preset: {}", s))
    }
}

impl std::fmt::Display for DatePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive `(start, end)` range for a preset
///
/// Weeks start on Sunday. `Custom` resolves to `today` alone.
pub fn date_range_from_preset(preset: DatePreset, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days = |n: i64| Duration::days(n);
    let week_start = today - days(i64::from(today.weekday().num_days_from_sunday()));
    let year_start = |year: i32| NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today);
    let year_end = |year: i32| NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(today);

    match preset {
        DatePreset::Today | DatePreset::Custom => (today, today),
        DatePreset::Yesterday => (today - days(1), today - days(1)),
        DatePreset::ThisWeek => (week_start, today),
        DatePreset::LastWeek => (week_start - days(7), week_start - days(1)),
        DatePreset::ThisMonth => (period::month_start(today), today),
        DatePreset::LastMonth => {
            let start = period::previous_month(today);
            (start, period::month_end(start))
        }
        DatePreset::Last7Days => (today - days(6), today),
        DatePreset::Last30Days => (today - days(29), today),
        DatePreset::Last90Days => (today - days(89), today),
        DatePreset::ThisYear => (year_start(today.year()), today),
        DatePreset::LastYear => (year_start(today.year() - 1), year_end(today.year() - 1)),
    }
}

/// Criteria for narrowing an expense list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFilters {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search_query: Option<String>,
    pub date_preset: Option<DatePreset>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

impl ExpenseFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to these categories (empty means all)
    pub fn categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Set inclusive date bounds
    pub fn date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Set a date preset; explicit bounds take precedence
    pub fn preset(mut self, preset: Option<DatePreset>) -> Self {
        self.date_preset = preset;
        self
    }

    /// Case-insensitive text search over description, category and amount
    pub fn search(mut self, query: Option<String>) -> Self {
        self.search_query = query.filter(|q| !q.trim().is_empty());
        self
    }

    /// Set inclusive amount bounds
    pub fn amount_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    /// Date bounds after resolving the preset against `today`
    pub fn effective_dates(&self, today: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
        match self.date_preset {
            Some(preset)
                if preset != DatePreset::Custom
                    && self.start_date.is_none()
                    && self.end_date.is_none() =>
            {
                let (start, end) = date_range_from_preset(preset, today);
                (Some(start), Some(end))
            }
            _ => (self.start_date, self.end_date),
        }
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.search_query.is_none()
            && matches!(self.date_preset, None | Some(DatePreset::Custom))
            && self.min_amount.is_none()
            && self.max_amount.is_none()
    }

    fn matches(&self, expense: &Expense, dates: (Option<NaiveDate>, Option<NaiveDate>)) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&expense.category) {
            return false;
        }

        let (start, end) = dates;
        if start.is_some_and(|s| expense.date < s) || end.is_some_and(|e| expense.date > e) {
            return false;
        }

        if self.min_amount.is_some_and(|m| expense.amount < m)
            || self.max_amount.is_some_and(|m| expense.amount > m)
        {
            return false;
        }

        if let Some(query) = &self.search_query {
            let query = query.to_lowercase();
            let hit = expense.description.to_lowercase().contains(&query)
                || expense.category.to_lowercase().contains(&query)
                || expense.amount.to_string().contains(&query);
            if !hit {
                return false;
            }
        }

        true
    }
}

/// Expenses matching every criterion in `filters`, in input order
pub fn filter_expenses(
    expenses: &[Expense],
    filters: &ExpenseFilters,
    today: NaiveDate,
) -> Vec<Expense> {
    let dates = filters.effective_dates(today);
    expenses
        .iter()
        .filter(|e| filters.matches(e, dates))
        .cloned()
        .collect()
}

/// Whole-number bounds covering every amount, `(0, 1000)` when empty
pub fn amount_range(expenses: &[Expense]) -> (f64, f64) {
    if expenses.is_empty() {
        return (0.0, 1000.0);
    }

    let min = expenses.iter().map(|e| e.amount).fold(f64::INFINITY, f64::min);
    let max = expenses
        .iter()
        .map(|e| e.amount)
        .fold(f64::NEG_INFINITY, f64::max);

    (min.floor(), max.ceil())
}
