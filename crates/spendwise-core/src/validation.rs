//! Expense form validation

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::NewExpense;

/// Field name to message, empty when the form is valid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn add(&mut self, field: &'static str, message: &str) {
        self.0.insert(field, message.to_string());
    }

    /// Collapse into a validation error, `Ok` when valid
    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            return Ok(());
        }
        let joined = self
            .0
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect::<Vec<_>>()
            .join("; ");
        Err(Error::Validation(joined))
    }
}

/// Check raw form input the way the entry form does
pub fn validate_expense_form(amount: &str, description: &str, date: &str) -> FormErrors {
    let mut errors = FormErrors::default();

    let amount_ok = amount
        .trim()
        .parse::<f64>()
        .map(|a| a.is_finite() && a > 0.0)
        .unwrap_or(false);
    if !amount_ok {
        errors.add("amount", "Amount must be greater than 0");
    }

    if description.trim().is_empty() {
        errors.add("description", "Description is required");
    }

    if date.trim().is_empty() {
        errors.add("date", "Date is required");
    } else if NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").is_err() {
        errors.add("date", "Date must be in YYYY-MM-DD format");
    }

    errors
}

/// Validate an already-typed expense before it is stored
pub fn validate_new_expense(expense: &NewExpense) -> Result<()> {
    let mut errors = FormErrors::default();

    if !(expense.amount.is_finite() && expense.amount > 0.0) {
        errors.add("amount", "Amount must be greater than 0");
    }
    if expense.description.trim().is_empty() {
        errors.add("description", "Description is required");
    }
    if expense.category.trim().is_empty() {
        errors.add("category", "Category is required");
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, new_expense};

    #[test]
    fn test_valid_form() {
        assert!(validate_expense_form("12.50", "Lunch", "2024-03-01").is_valid());
    }

    #[test]
    fn test_every_field_reported() {
        let errors = validate_expense_form("0", "  ", "");
        assert!(!errors.is_valid());
        assert_eq!(errors.get("amount"), Some("Amount must be greater than 0"));
        assert_eq!(errors.get("description"), Some("Description is required"));
        assert_eq!(errors.get("date"), Some("Date is required"));
        assert_eq!(errors.fields().count(), 3);
    }

    #[test]
    fn test_unparseable_input() {
        let errors = validate_expense_form("abc", "Lunch", "03/01/2024");
        assert!(errors.get("amount").is_some());
        assert_eq!(errors.get("date"), Some("Date must be in YYYY-MM-DD format"));
        assert!(errors.get("description").is_none());
    }

    #[test]
    fn test_new_expense_validation() {
        assert!(validate_new_expense(&new_expense("Lunch", 10.0, "Food", date(2024, 3, 1))).is_ok());

        let err = validate_new_expense(&new_expense("", -1.0, "Food", date(2024, 3, 1)))
            .unwrap_err()
            .to_string();
        assert!(err.contains("amount"));
        assert!(err.contains("description"));
    }
}
