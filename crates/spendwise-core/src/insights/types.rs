//! Core types for the insight engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of insight shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// Something needs attention (budget overrun, spending spike)
    Warning,
    /// Optimization suggestion
    Tip,
    /// Positive reinforcement
    Achievement,
    /// Forecast of upcoming spending
    Prediction,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Warning => "warning",
            InsightKind::Tip => "tip",
            InsightKind::Achievement => "achievement",
            InsightKind::Prediction => "prediction",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(InsightKind::Warning),
            "tip" => Ok(InsightKind::Tip),
            "achievement" => Ok(InsightKind::Achievement),
            "prediction" => Ok(InsightKind::Prediction),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// Output of a single rule, before the engine assigns an id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    pub category: Option<String>,
    pub amount: Option<f64>,
    /// Higher is more important
    pub priority: u8,
}

impl Finding {
    pub fn new(
        kind: InsightKind,
        priority: u8,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            category: None,
            amount: None,
            priority,
        }
    }

    /// Tag the finding with a category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach the amount the finding is about
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }
}

/// A generated insight
///
/// Insights are regenerated on every call and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartInsight {
    /// Unique within one generation call (`insight-<n>`)
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub date: DateTime<Utc>,
    pub priority: u8,
}

impl SmartInsight {
    pub(crate) fn from_finding(finding: Finding, id: String, date: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: finding.kind,
            title: finding.title,
            message: finding.message,
            category: finding.category,
            amount: finding.amount,
            date,
            priority: finding.priority,
        }
    }
}
