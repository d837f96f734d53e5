//! Recurring expense detection
//!
//! Groups expenses by normalized description and scores how regular the gaps
//! between occurrences are. A recurring expense is characterized by:
//! 1. At least 2 occurrences of the same (case-insensitive, trimmed) description
//! 2. A low coefficient of variation across the day gaps between occurrences
//!
//! Confidence is `100 - CV%`, clamped to 0-100. A group with exactly two
//! occurrences has a single interval and therefore zero variance, so it always
//! scores 100 regardless of how long the gap is.

use std::collections::HashMap;

use chrono::Duration;
use tracing::debug;

use crate::models::{Expense, Frequency, RecurringExpense};

/// Detection thresholds
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Groups smaller than this are ignored
    pub min_occurrences: usize,
    /// Confidence must be strictly greater than this to report
    pub min_confidence: f64,
    /// Average interval (days) at or below which a pattern is daily
    pub daily_max_interval: f64,
    /// Average interval (days) at or below which a pattern is weekly
    pub weekly_max_interval: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_occurrences: 2,
            min_confidence: 40.0,
            daily_max_interval: 3.0,
            weekly_max_interval: 10.0,
        }
    }
}

/// Grouping key for a description
pub fn normalize_description(description: &str) -> String {
    description.trim().to_lowercase()
}

/// Detect recurring expenses with the default thresholds
pub fn detect_recurring(expenses: &[Expense]) -> Vec<RecurringExpense> {
    detect_recurring_with(expenses, &DetectionConfig::default())
}

/// Detect recurring expenses, sorted by confidence (highest first)
///
/// Ties keep the order in which each description first appears in `expenses`.
pub fn detect_recurring_with(
    expenses: &[Expense],
    config: &DetectionConfig,
) -> Vec<RecurringExpense> {
    // Vec + index map keeps first-appearance order for stable tie-breaking
    let mut groups: Vec<Vec<&Expense>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for expense in expenses {
        let key = normalize_description(&expense.description);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(expense);
    }

    let mut recurring: Vec<RecurringExpense> = groups
        .iter()
        .filter(|group| group.len() >= config.min_occurrences.max(2))
        .filter_map(|group| analyze_group(group, config))
        .collect();

    recurring.sort_by(|a, b| b.confidence.cmp(&a.confidence));

    debug!(
        groups = groups.len(),
        recurring = recurring.len(),
        "Recurring expense detection complete"
    );

    recurring
}

fn analyze_group(group: &[&Expense], config: &DetectionConfig) -> Option<RecurringExpense> {
    let first = group.first()?;

    let mut sorted = group.to_vec();
    sorted.sort_by_key(|e| e.date);
    let last = sorted.last()?;

    let intervals: Vec<f64> = sorted
        .windows(2)
        .map(|w| (w[1].date - w[0].date).num_days() as f64)
        .collect();
    if intervals.is_empty() {
        return None;
    }

    let avg_interval = mean(&intervals);
    let confidence = interval_confidence(&intervals, avg_interval);
    if confidence <= config.min_confidence {
        return None;
    }

    let frequency = if avg_interval <= config.daily_max_interval {
        Frequency::Daily
    } else if avg_interval <= config.weekly_max_interval {
        Frequency::Weekly
    } else {
        Frequency::Monthly
    };

    let amounts: Vec<f64> = group.iter().map(|e| e.amount).collect();

    Some(RecurringExpense {
        description: first.description.clone(),
        category: first.category.clone(),
        average_amount: mean(&amounts),
        frequency,
        occurrences: group.len(),
        confidence: confidence.round() as u8,
        last_occurrence: last.date,
        next_expected: last.date + Duration::days(avg_interval.round() as i64),
    })
}

/// `100 - CV%` clamped to 0-100; 0 when every occurrence shares one date
fn interval_confidence(intervals: &[f64], avg_interval: f64) -> f64 {
    if avg_interval <= 0.0 {
        return 0.0;
    }
    let coefficient_of_variation = population_std_dev(intervals, avg_interval) / avg_interval * 100.0;
    (100.0 - coefficient_of_variation).clamp(0.0, 100.0)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
