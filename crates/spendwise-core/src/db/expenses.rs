//! Expense operations

use chrono::Utc;
use tracing::info;

use super::{generate_id, Database, EXPENSES_KEY};
use crate::error::{Error, Result};
use crate::models::{Expense, NewExpense};
use crate::validation::validate_new_expense;

impl Database {
    /// All stored expenses, in insertion order
    pub fn list_expenses(&self) -> Result<Vec<Expense>> {
        Ok(self.get_json(EXPENSES_KEY)?.unwrap_or_default())
    }

    /// Get an expense by ID
    pub fn get_expense(&self, id: &str) -> Result<Option<Expense>> {
        Ok(self.list_expenses()?.into_iter().find(|e| e.id == id))
    }

    /// Validate and append a new expense
    ///
    /// The category must exist in the registry; its registered spelling is
    /// stored.
    pub fn add_expense(&self, new: &NewExpense) -> Result<Expense> {
        validate_new_expense(new)?;
        let category = self.resolve_category(&new.category)?;

        let now = Utc::now();
        let expense = Expense {
            id: generate_id(),
            date: new.date,
            amount: new.amount,
            category,
            description: new.description.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        let mut expenses = self.list_expenses()?;
        expenses.push(expense.clone());
        self.put_json(EXPENSES_KEY, &expenses)?;

        info!(id = %expense.id, amount = expense.amount, category = %expense.category, "Added expense");
        Ok(expense)
    }

    /// Replace the editable fields of an expense, keeping `created_at`
    ///
    /// An expense may keep its current category even after that category has
    /// left the registry.
    pub fn update_expense(&self, id: &str, update: &NewExpense) -> Result<Expense> {
        validate_new_expense(update)?;

        let mut expenses = self.list_expenses()?;
        let expense = expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::NotFound(format!("Expense {}", id)))?;

        let category = match self.resolve_category(&update.category) {
            Ok(name) => name,
            Err(Error::Category(_)) if update.category.trim() == expense.category => {
                expense.category.clone()
            }
            Err(e) => return Err(e),
        };

        expense.date = update.date;
        expense.amount = update.amount;
        expense.category = category;
        expense.description = update.description.trim().to_string();
        expense.updated_at = Utc::now();
        let updated = expense.clone();

        self.put_json(EXPENSES_KEY, &expenses)?;

        info!(id, "Updated expense");
        Ok(updated)
    }

    /// Delete an expense; returns whether it existed
    pub fn delete_expense(&self, id: &str) -> Result<bool> {
        let mut expenses = self.list_expenses()?;
        let before = expenses.len();
        expenses.retain(|e| e.id != id);

        if expenses.len() == before {
            return Ok(false);
        }

        self.put_json(EXPENSES_KEY, &expenses)?;
        info!(id, "Deleted expense");
        Ok(true)
    }

    /// Remove every expense
    pub fn clear_expenses(&self) -> Result<()> {
        self.remove(EXPENSES_KEY)?;
        info!("Cleared all expenses");
        Ok(())
    }

    /// Overwrite the stored list (used by restore)
    pub fn replace_expenses(&self, expenses: &[Expense]) -> Result<()> {
        self.put_json(EXPENSES_KEY, expenses)
    }

    fn resolve_category(&self, name: &str) -> Result<String> {
        self.get_category_by_name(name.trim())?
            .map(|c| c.name)
            .ok_or_else(|| Error::Category(format!("Unknown category \"{}\"", name.trim())))
    }
}
