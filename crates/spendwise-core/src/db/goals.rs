//! Savings goal operations

use chrono::Utc;
use tracing::info;

use super::{generate_id, Database, GOALS_KEY};
use crate::error::{Error, Result};
use crate::models::{NewSavingsGoal, SavingsGoal};

fn validate_goal(goal: &NewSavingsGoal) -> Result<()> {
    if goal.name.trim().is_empty() {
        return Err(Error::Validation("Goal name is required".to_string()));
    }
    if !(goal.target_amount.is_finite() && goal.target_amount > 0.0) {
        return Err(Error::Validation(
            "Target amount must be greater than 0".to_string(),
        ));
    }
    if !(goal.current_amount.is_finite() && goal.current_amount >= 0.0) {
        return Err(Error::Validation(
            "Current amount cannot be negative".to_string(),
        ));
    }
    Ok(())
}

impl Database {
    pub fn list_goals(&self) -> Result<Vec<SavingsGoal>> {
        Ok(self.get_json(GOALS_KEY)?.unwrap_or_default())
    }

    pub fn add_goal(&self, new: &NewSavingsGoal) -> Result<SavingsGoal> {
        validate_goal(new)?;

        let now = Utc::now();
        let goal = SavingsGoal {
            id: generate_id(),
            name: new.name.trim().to_string(),
            target_amount: new.target_amount,
            current_amount: new.current_amount,
            deadline: new.deadline,
            category: new.category.clone(),
            priority: new.priority,
            created_at: now,
            updated_at: now,
        };

        let mut goals = self.list_goals()?;
        goals.push(goal.clone());
        self.put_json(GOALS_KEY, &goals)?;

        info!(id = %goal.id, name = %goal.name, "Added savings goal");
        Ok(goal)
    }

    /// Replace a goal's fields, keeping its id and creation time
    pub fn update_goal(&self, id: &str, update: &NewSavingsGoal) -> Result<SavingsGoal> {
        validate_goal(update)?;

        self.modify_goal(id, |goal| {
            goal.name = update.name.trim().to_string();
            goal.target_amount = update.target_amount;
            goal.current_amount = update.current_amount;
            goal.deadline = update.deadline;
            goal.category = update.category.clone();
            goal.priority = update.priority;
        })
    }

    /// Record how much has been saved toward a goal
    pub fn update_goal_progress(&self, id: &str, current_amount: f64) -> Result<SavingsGoal> {
        if !(current_amount.is_finite() && current_amount >= 0.0) {
            return Err(Error::Validation(
                "Current amount cannot be negative".to_string(),
            ));
        }

        let goal = self.modify_goal(id, |goal| goal.current_amount = current_amount)?;
        info!(id, progress = goal.progress_percent(), "Updated goal progress");
        Ok(goal)
    }

    /// Delete a goal; returns whether it existed
    pub fn delete_goal(&self, id: &str) -> Result<bool> {
        let mut goals = self.list_goals()?;
        let before = goals.len();
        goals.retain(|g| g.id != id);

        if goals.len() == before {
            return Ok(false);
        }

        self.put_json(GOALS_KEY, &goals)?;
        info!(id, "Deleted savings goal");
        Ok(true)
    }

    /// Overwrite the stored list (used by restore)
    pub fn replace_goals(&self, goals: &[SavingsGoal]) -> Result<()> {
        self.put_json(GOALS_KEY, goals)
    }

    fn modify_goal(&self, id: &str, apply: impl FnOnce(&mut SavingsGoal)) -> Result<SavingsGoal> {
        let mut goals = self.list_goals()?;
        let goal = goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| Error::NotFound(format!("Savings goal {}", id)))?;

        apply(goal);
        goal.updated_at = Utc::now();
        let updated = goal.clone();

        self.put_json(GOALS_KEY, &goals)?;
        Ok(updated)
    }
}
