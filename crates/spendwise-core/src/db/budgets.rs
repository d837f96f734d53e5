//! Budget settings

use tracing::info;

use super::{Database, BUDGETS_KEY};
use crate::error::{Error, Result};
use crate::models::BudgetSettings;

impl Database {
    /// Stored settings, or zero limits for the default categories
    pub fn get_budget_settings(&self) -> Result<BudgetSettings> {
        Ok(self.get_json(BUDGETS_KEY)?.unwrap_or_default())
    }

    pub fn save_budget_settings(&self, settings: &BudgetSettings) -> Result<()> {
        self.put_json(BUDGETS_KEY, settings)?;
        info!(categories = settings.budgets.len(), "Saved budget settings");
        Ok(())
    }

    /// Set one category's monthly limit (0 clears it)
    pub fn set_budget_limit(&self, category: &str, limit: f64) -> Result<BudgetSettings> {
        if !limit.is_finite() || limit < 0.0 {
            return Err(Error::Validation(format!(
                "Budget limit must be zero or positive, got {}",
                limit
            )));
        }

        let category = self
            .get_category_by_name(category)?
            .map(|c| c.name)
            .ok_or_else(|| Error::Category(format!("Unknown category \"{}\"", category)))?;

        let mut settings = self.get_budget_settings()?;
        settings.budgets.insert(category.clone(), limit);
        self.save_budget_settings(&settings)?;

        info!(category = %category, limit, "Set budget limit");
        Ok(settings)
    }

    /// Change the display currency code
    pub fn set_currency(&self, currency: &str) -> Result<BudgetSettings> {
        let code = currency.trim().to_uppercase();
        if code.is_empty() {
            return Err(Error::Validation("Currency code is required".to_string()));
        }

        let mut settings = self.get_budget_settings()?;
        settings.currency = code;
        self.save_budget_settings(&settings)?;
        Ok(settings)
    }
}
