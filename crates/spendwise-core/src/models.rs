//! Domain models for Spendwise
//!
//! Persisted records use camelCase field names so the stored JSON matches the
//! layout of the key-value blobs.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Categories that ship with the app, in display order
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Food",
    "Transportation",
    "Entertainment",
    "Shopping",
    "Bills",
    "Other",
];

/// Currency used when budget settings have never been saved
pub const DEFAULT_CURRENCY: &str = "USD";

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub description: String,
}

/// A category in the registry (default or user-defined)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCategory {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    /// Empty for the built-in defaults
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub is_default: bool,
}

impl CustomCategory {
    /// The built-in registry
    pub fn defaults() -> Vec<CustomCategory> {
        [
            ("food", "Food", "🍔", "#ef4444"),
            ("transportation", "Transportation", "🚗", "#f97316"),
            ("entertainment", "Entertainment", "🎮", "#8b5cf6"),
            ("shopping", "Shopping", "🛍️", "#ec4899"),
            ("bills", "Bills", "📄", "#3b82f6"),
            ("other", "Other", "📌", "#6b7280"),
        ]
        .into_iter()
        .map(|(id, name, icon, color)| CustomCategory {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            created_at: String::new(),
            is_default: true,
        })
        .collect()
    }
}

/// Per-category monthly limits plus display currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSettings {
    pub budgets: BTreeMap<String, f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl BudgetSettings {
    /// Fresh zero-limit settings for the given categories
    pub fn for_categories<S: AsRef<str>>(categories: &[S]) -> Self {
        Self {
            budgets: categories
                .iter()
                .map(|c| (c.as_ref().to_string(), 0.0))
                .collect(),
            currency: default_currency(),
        }
    }

    /// Monthly limit for a category, 0 when unset
    pub fn limit_for(&self, category: &str) -> f64 {
        self.budgets.get(category).copied().unwrap_or(0.0)
    }

    pub fn total_limit(&self) -> f64 {
        self.budgets.values().sum()
    }
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self::for_categories(&DEFAULT_CATEGORIES)
    }
}

/// Savings goal priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl GoalPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::str::FromStr for GoalPriority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Unknown goal priority: {}", s)),
        }
    }
}

impl std::fmt::Display for GoalPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: GoalPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavingsGoal {
    /// Progress toward the target as a percentage (capped at 100)
    pub fn progress_percent(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount * 100.0).min(100.0)
    }
}

/// Input for creating a savings goal
#[derive(Debug, Clone, PartialEq)]
pub struct NewSavingsGoal {
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: NaiveDate,
    pub category: Option<String>,
    pub priority: GoalPriority,
}

/// Budget status of one category for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBudget {
    pub category: String,
    pub monthly_limit: f64,
    pub spent: f64,
    /// May be negative when over budget
    pub remaining: f64,
    /// 0 when no limit is set; may exceed 100
    pub percentage_used: f64,
}

/// How often a recurring expense repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An expense that repeats at a consistent interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringExpense {
    pub description: String,
    pub category: String,
    pub average_amount: f64,
    pub frequency: Frequency,
    pub occurrences: usize,
    /// 0-100, rounded
    pub confidence: u8,
    pub last_occurrence: NaiveDate,
    pub next_expected: NaiveDate,
}

/// Overall financial health band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthLevel {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }
}

impl std::fmt::Display for HealthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The four independently normalized health factors (each 0-100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthFactors {
    pub budget_adherence: f64,
    pub savings_rate: f64,
    pub spending_trend: f64,
    pub category_balance: f64,
}

/// Composite financial health score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialHealth {
    pub score: u8,
    pub level: HealthLevel,
    pub factors: HealthFactors,
    pub recommendations: Vec<String>,
}
