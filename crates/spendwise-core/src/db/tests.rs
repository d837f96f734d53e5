//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::{date, new_expense};

    fn goal(name: &str, target: f64) -> NewSavingsGoal {
        NewSavingsGoal {
            name: name.to_string(),
            target_amount: target,
            current_amount: 0.0,
            deadline: date(2025, 12, 31),
            category: None,
            priority: GoalPriority::Medium,
        }
    }

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        assert!(db.list_expenses().unwrap().is_empty());
        assert!(db.list_goals().unwrap().is_empty());
        assert_eq!(db.path(), ":memory:");
    }

    #[test]
    fn test_generate_id_format() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);

        let (millis, suffix) = a.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_expense_crud() {
        let db = Database::in_memory().unwrap();

        let added = db
            .add_expense(&new_expense("  Lunch ", 12.5, "food", date(2024, 3, 1)))
            .unwrap();
        assert_eq!(added.description, "Lunch");
        assert_eq!(added.category, "Food");
        assert_eq!(added.created_at, added.updated_at);

        let fetched = db.get_expense(&added.id).unwrap().unwrap();
        assert_eq!(fetched, added);

        let updated = db
            .update_expense(&added.id, &new_expense("Dinner", 30.0, "Food", date(2024, 3, 2)))
            .unwrap();
        assert_eq!(updated.id, added.id);
        assert_eq!(updated.amount, 30.0);
        assert_eq!(updated.created_at, added.created_at);
        assert!(updated.updated_at >= added.updated_at);

        assert!(db.delete_expense(&added.id).unwrap());
        assert!(!db.delete_expense(&added.id).unwrap());
        assert!(db.list_expenses().unwrap().is_empty());
    }

    #[test]
    fn test_expenses_keep_insertion_order() {
        let db = Database::in_memory().unwrap();
        for (desc, day) in [("b", 5), ("a", 1), ("c", 3)] {
            db.add_expense(&new_expense(desc, 1.0, "Other", date(2024, 3, day)))
                .unwrap();
        }
        let descriptions: Vec<String> = db
            .list_expenses()
            .unwrap()
            .into_iter()
            .map(|e| e.description)
            .collect();
        assert_eq!(descriptions, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_add_expense_validation() {
        let db = Database::in_memory().unwrap();

        let err = db
            .add_expense(&new_expense("Lunch", 0.0, "Food", date(2024, 3, 1)))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = db
            .add_expense(&new_expense("Lunch", 5.0, "Groceries", date(2024, 3, 1)))
            .unwrap_err();
        assert!(matches!(err, Error::Category(_)));
    }

    #[test]
    fn test_update_missing_expense() {
        let db = Database::in_memory().unwrap();
        let err = db
            .update_expense("nope", &new_expense("Lunch", 5.0, "Food", date(2024, 3, 1)))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_clear_expenses() {
        let db = Database::in_memory().unwrap();
        db.add_expense(&new_expense("Lunch", 5.0, "Food", date(2024, 3, 1)))
            .unwrap();
        db.clear_expenses().unwrap();
        assert!(db.list_expenses().unwrap().is_empty());
        assert!(db.get_raw(EXPENSES_KEY).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_blob_reads_as_default() {
        let db = Database::in_memory().unwrap();
        db.put_raw(EXPENSES_KEY, "{not json").unwrap();
        db.put_raw(BUDGETS_KEY, "[]").unwrap();

        assert!(db.list_expenses().unwrap().is_empty());
        assert_eq!(db.get_budget_settings().unwrap(), BudgetSettings::default());
    }

    #[test]
    fn test_stored_blob_is_camel_case_json() {
        let db = Database::in_memory().unwrap();
        db.add_expense(&new_expense("Lunch", 5.0, "Food", date(2024, 3, 1)))
            .unwrap();

        let raw = db.get_raw(EXPENSES_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["date"], "2024-03-01");
        assert!(value[0].get("createdAt").is_some());
        assert!(value[0].get("created_at").is_none());
    }

    #[test]
    fn test_budget_settings() {
        let db = Database::in_memory().unwrap();

        let settings = db.get_budget_settings().unwrap();
        assert_eq!(settings.currency, "USD");
        assert_eq!(settings.total_limit(), 0.0);

        db.set_budget_limit("food", 250.0).unwrap();
        let settings = db.get_budget_settings().unwrap();
        assert_eq!(settings.limit_for("Food"), 250.0);

        assert!(matches!(
            db.set_budget_limit("Food", -1.0),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            db.set_budget_limit("Nowhere", 10.0),
            Err(Error::Category(_))
        ));

        let settings = db.set_currency(" eur ").unwrap();
        assert_eq!(settings.currency, "EUR");
        assert_eq!(settings.limit_for("Food"), 250.0);
    }

    #[test]
    fn test_goal_crud() {
        let db = Database::in_memory().unwrap();

        let added = db.add_goal(&goal("Vacation", 2000.0)).unwrap();
        assert_eq!(db.list_goals().unwrap().len(), 1);

        let progressed = db.update_goal_progress(&added.id, 500.0).unwrap();
        assert_eq!(progressed.current_amount, 500.0);
        assert_eq!(progressed.progress_percent(), 25.0);

        let mut change = goal("Big Vacation", 3000.0);
        change.priority = GoalPriority::High;
        let updated = db.update_goal(&added.id, &change).unwrap();
        assert_eq!(updated.name, "Big Vacation");
        assert_eq!(updated.priority, GoalPriority::High);
        assert_eq!(updated.created_at, added.created_at);

        assert!(db.delete_goal(&added.id).unwrap());
        assert!(db.list_goals().unwrap().is_empty());
    }

    #[test]
    fn test_goal_validation() {
        let db = Database::in_memory().unwrap();
        assert!(db.add_goal(&goal("", 100.0)).is_err());
        assert!(db.add_goal(&goal("Car", 0.0)).is_err());
        assert!(matches!(
            db.update_goal_progress("missing", 10.0),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_default_categories() {
        let db = Database::in_memory().unwrap();
        assert_eq!(db.category_names().unwrap(), DEFAULT_CATEGORIES.to_vec());
        assert!(db.list_categories().unwrap().iter().all(|c| c.is_default));
    }

    #[test]
    fn test_category_lifecycle() {
        let db = Database::in_memory().unwrap();

        let pets = db.add_category("Pets", "🐶", "#22c55e").unwrap();
        assert!(!pets.is_default);
        assert!(pets.id.starts_with("custom-"));
        assert_eq!(db.category_names().unwrap().last().unwrap(), "Pets");

        assert!(matches!(
            db.add_category("pets", "🐱", "#000000"),
            Err(Error::Category(_))
        ));

        let renamed = db
            .update_category(
                &pets.id,
                &CategoryUpdate {
                    name: Some("Animals".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "Animals");
        assert_eq!(renamed.icon, "🐶");

        assert!(matches!(
            db.update_category(
                &pets.id,
                &CategoryUpdate {
                    name: Some("FOOD".to_string()),
                    ..Default::default()
                }
            ),
            Err(Error::Category(_))
        ));
        assert!(db
            .update_category("missing", &CategoryUpdate::default())
            .unwrap()
            .is_none());

        assert!(db.get_category_by_name("animals").unwrap().is_some());
        assert!(db.delete_category(&pets.id).unwrap());
        assert!(!db.delete_category(&pets.id).unwrap());
    }

    #[test]
    fn test_default_categories_cannot_be_deleted() {
        let db = Database::in_memory().unwrap();
        assert!(matches!(
            db.delete_category("food"),
            Err(Error::Category(_))
        ));
    }

    #[test]
    fn test_reset_categories() {
        let db = Database::in_memory().unwrap();
        db.add_category("Pets", "🐶", "#22c55e").unwrap();
        db.reset_categories().unwrap();
        assert_eq!(db.list_categories().unwrap(), CustomCategory::defaults());
    }

    #[test]
    fn test_rename_category_moves_expenses_and_limit() {
        let db = Database::in_memory().unwrap();
        let lunch = db
            .add_expense(&new_expense("Lunch", 40.0, "Food", date(2024, 3, 5)))
            .unwrap();
        db.set_budget_limit("Food", 300.0).unwrap();
        let mut savings = goal("Pantry", 500.0);
        savings.category = Some("Food".to_string());
        db.add_goal(&savings).unwrap();

        db.update_category(
            "food",
            &CategoryUpdate {
                name: Some("Groceries".to_string()),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();

        let stored = db.get_expense(&lunch.id).unwrap().unwrap();
        assert_eq!(stored.category, "Groceries");
        assert_eq!(
            db.list_goals().unwrap()[0].category.as_deref(),
            Some("Groceries")
        );

        let settings = db.get_budget_settings().unwrap();
        assert_eq!(settings.limit_for("Groceries"), 300.0);
        assert!(!settings.budgets.contains_key("Food"));

        // Editing after the rename keeps working
        let mut change = new_expense("Big lunch", 60.0, "Groceries", date(2024, 3, 5));
        let edited = db.update_expense(&lunch.id, &change).unwrap();
        assert_eq!(edited.category, "Groceries");
        change.category = "Food".to_string();
        assert!(matches!(
            db.update_expense(&lunch.id, &change),
            Err(Error::Category(_))
        ));

        let names = db.category_names().unwrap();
        let rows = crate::budget::compute_budgets(
            &db.list_expenses().unwrap(),
            &names,
            &settings,
            date(2024, 3, 15),
        );
        let groceries = rows.iter().find(|b| b.category == "Groceries").unwrap();
        assert_eq!(groceries.spent, 60.0);
        assert_eq!(groceries.monthly_limit, 300.0);
        assert_eq!(groceries.remaining, 240.0);
    }

    #[test]
    fn test_expense_keeps_category_removed_by_reset() {
        let db = Database::in_memory().unwrap();
        db.add_category("Pets", "🐶", "#22c55e").unwrap();
        let kibble = db
            .add_expense(&new_expense("Kibble", 25.0, "pets", date(2024, 3, 2)))
            .unwrap();
        assert_eq!(kibble.category, "Pets");

        db.reset_categories().unwrap();
        assert!(db.get_category_by_name("Pets").unwrap().is_none());

        let edited = db
            .update_expense(&kibble.id, &new_expense("Kibble", 30.0, "Pets", date(2024, 3, 2)))
            .unwrap();
        assert_eq!(edited.category, "Pets");
        assert_eq!(edited.amount, 30.0);

        assert!(db
            .add_expense(&new_expense("Toy", 5.0, "Pets", date(2024, 3, 3)))
            .is_err());
    }

    #[test]
    fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spendwise.db");
        let path = path.to_str().unwrap();

        {
            let db = Database::new(path).unwrap();
            db.add_expense(&new_expense("Lunch", 5.0, "Food", date(2024, 3, 1)))
                .unwrap();
        }

        let db = Database::new(path).unwrap();
        assert_eq!(db.list_expenses().unwrap().len(), 1);
        let keys: Vec<String> = db.stored_keys().unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![EXPENSES_KEY.to_string()]);
    }
}
