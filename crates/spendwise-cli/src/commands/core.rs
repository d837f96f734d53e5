//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `load_config` - Load settings from the config file
//! - `open_db` - Shared utility to open the database
//! - `reference_date` / `reference_now` - The clock every report runs against
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use spendwise_core::db::{BUDGETS_KEY, CATEGORIES_KEY};
use spendwise_core::{BudgetSettings, Config, Database};
use tracing::debug;

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load(path).context("Failed to load config")
}

/// Open the database at `--db`, the configured path, or the default location
pub fn open_db(db_path: Option<&Path>, config: &Config) -> Result<Database> {
    let path = match db_path {
        Some(path) => path.to_path_buf(),
        None => config
            .resolved_db_path()
            .context("Could not determine a database location; pass --db")?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let path_str = path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", path.display()))?;
    debug!(path = path_str, "Opening database");
    Database::new(path_str).context("Failed to open database")
}

/// The pinned `--today`, else the local calendar day
pub fn reference_date(pinned: Option<NaiveDate>) -> NaiveDate {
    pinned.unwrap_or_else(|| Local::now().date_naive())
}

/// Timestamp stamped on generated output; noon UTC of a pinned day
pub fn reference_now(pinned: Option<NaiveDate>) -> DateTime<Utc> {
    match pinned {
        Some(day) => day.and_time(NaiveTime::MIN).and_utc() + chrono::Duration::hours(12),
        None => Utc::now(),
    }
}

pub fn cmd_init(db: &Database, config: &Config) -> Result<()> {
    println!("🔧 Initializing database at {}...", db.path());

    if db.get_raw(CATEGORIES_KEY)?.is_none() {
        db.reset_categories().context("Failed to seed categories")?;
        println!("   Seeded default categories");
    }

    if db.get_raw(BUDGETS_KEY)?.is_none() {
        let categories = db.category_names()?;
        let mut settings = BudgetSettings::for_categories(&categories);
        settings.currency = config.currency.clone();
        db.save_budget_settings(&settings)
            .context("Failed to save budget settings")?;
        println!("   Currency: {}", settings.currency);
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record an expense: spendwise add 12.50 \"Lunch\" --category Food");
    println!("  2. Set a budget: spendwise budget set Food 400");
    println!("  3. See how you're doing: spendwise dashboard");

    Ok(())
}
