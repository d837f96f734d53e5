//! Category registry operations
//!
//! Names are compared case-insensitively. The six built-in categories can be
//! renamed but never deleted.

use chrono::Utc;
use tracing::info;

use super::{generate_id, Database, BUDGETS_KEY, CATEGORIES_KEY};
use crate::error::{Error, Result};
use crate::models::CustomCategory;

/// Changes applied by [`Database::update_category`]
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl Database {
    /// The registry, or the built-in defaults when never saved
    pub fn list_categories(&self) -> Result<Vec<CustomCategory>> {
        Ok(self
            .get_json(CATEGORIES_KEY)?
            .unwrap_or_else(CustomCategory::defaults))
    }

    /// Add a user-defined category
    pub fn add_category(&self, name: &str, icon: &str, color: &str) -> Result<CustomCategory> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("Category name is required".to_string()));
        }

        let mut categories = self.list_categories()?;
        if categories.iter().any(|c| c.name.eq_ignore_ascii_case(name)) {
            return Err(Error::Category(format!("Category \"{}\" already exists", name)));
        }

        let now = Utc::now();
        let category = CustomCategory {
            id: format!("custom-{}", generate_id()),
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            created_at: now.to_rfc3339(),
            is_default: false,
        };

        categories.push(category.clone());
        self.put_json(CATEGORIES_KEY, &categories)?;

        info!(id = %category.id, name = %category.name, "Added category");
        Ok(category)
    }

    /// Apply partial changes; `Ok(None)` when the id is unknown
    pub fn update_category(
        &self,
        id: &str,
        update: &CategoryUpdate,
    ) -> Result<Option<CustomCategory>> {
        let mut categories = self.list_categories()?;
        let Some(index) = categories.iter().position(|c| c.id == id) else {
            return Ok(None);
        };

        let previous_name = categories[index].name.clone();
        if let Some(name) = &update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::Validation("Category name is required".to_string()));
            }
            if categories
                .iter()
                .any(|c| c.id != id && c.name.eq_ignore_ascii_case(name))
            {
                return Err(Error::Category(format!("Category \"{}\" already exists", name)));
            }
            categories[index].name = name.to_string();
        }
        if let Some(icon) = &update.icon {
            categories[index].icon = icon.clone();
        }
        if let Some(color) = &update.color {
            categories[index].color = color.clone();
        }

        let updated = categories[index].clone();
        self.put_json(CATEGORIES_KEY, &categories)?;

        if updated.name != previous_name {
            self.rename_category_references(&previous_name, &updated.name)?;
        }

        info!(id, name = %updated.name, "Updated category");
        Ok(Some(updated))
    }

    /// Delete a user-defined category; returns whether it existed
    pub fn delete_category(&self, id: &str) -> Result<bool> {
        let mut categories = self.list_categories()?;

        if categories.iter().any(|c| c.id == id && c.is_default) {
            return Err(Error::Category("Cannot delete default categories".to_string()));
        }

        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            return Ok(false);
        }

        self.put_json(CATEGORIES_KEY, &categories)?;
        info!(id, "Deleted category");
        Ok(true)
    }

    pub fn get_category_by_name(&self, name: &str) -> Result<Option<CustomCategory>> {
        Ok(self
            .list_categories()?
            .into_iter()
            .find(|c| c.name.eq_ignore_ascii_case(name)))
    }

    /// Registry names in display order
    pub fn category_names(&self) -> Result<Vec<String>> {
        Ok(self.list_categories()?.into_iter().map(|c| c.name).collect())
    }

    /// Move expenses, goals and the budget limit from `from` to `to`
    fn rename_category_references(&self, from: &str, to: &str) -> Result<()> {
        let mut expenses = self.list_expenses()?;
        let mut moved = 0;
        for expense in expenses.iter_mut().filter(|e| e.category == from) {
            expense.category = to.to_string();
            moved += 1;
        }
        if moved > 0 {
            self.replace_expenses(&expenses)?;
        }

        let mut goals = self.list_goals()?;
        let mut goals_moved = 0;
        for goal in goals
            .iter_mut()
            .filter(|g| g.category.as_deref() == Some(from))
        {
            goal.category = Some(to.to_string());
            goals_moved += 1;
        }
        if goals_moved > 0 {
            self.replace_goals(&goals)?;
        }

        if self.get_raw(BUDGETS_KEY)?.is_some() {
            let mut settings = self.get_budget_settings()?;
            if let Some(limit) = settings.budgets.remove(from) {
                settings.budgets.insert(to.to_string(), limit);
                self.save_budget_settings(&settings)?;
            }
        }

        info!(from, to, expenses = moved, goals = goals_moved, "Renamed category references");
        Ok(())
    }

    /// Restore the built-in registry, dropping user-defined categories
    pub fn reset_categories(&self) -> Result<()> {
        self.put_json(CATEGORIES_KEY, &CustomCategory::defaults())?;
        info!("Reset categories to defaults");
        Ok(())
    }

    /// Overwrite the stored registry (used by restore)
    pub fn replace_categories(&self, categories: &[CustomCategory]) -> Result<()> {
        self.put_json(CATEGORIES_KEY, categories)
    }
}
