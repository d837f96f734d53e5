//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use spendwise_core::{DatePreset, ExportFormat, GoalPriority};

/// Spendwise - Know where your money goes
#[derive(Parser)]
#[command(name = "spendwise")]
#[command(about = "Personal expense tracker with budgets, insights and a health score", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (overrides the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) used instead of the current day
    ///
    /// Pins month boundaries, forecasts and presets so output is reproducible.
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record an expense
    Add {
        /// Amount spent (positive)
        amount: String,

        /// What the money was spent on
        description: String,

        /// Category name
        #[arg(short, long, default_value = "Other")]
        category: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List expenses
    List {
        /// Only these categories (repeatable)
        #[arg(short, long)]
        category: Vec<String>,

        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Date preset: today, yesterday, thisWeek, lastWeek, thisMonth, lastMonth,
        /// last7Days, last30Days, last90Days, thisYear, lastYear
        #[arg(short, long)]
        preset: Option<DatePreset>,

        /// Text to search for in description, category or amount
        #[arg(short, long)]
        search: Option<String>,

        /// Minimum amount
        #[arg(long)]
        min: Option<f64>,

        /// Maximum amount
        #[arg(long)]
        max: Option<f64>,

        /// Maximum number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,

        /// New amount
        #[arg(long)]
        amount: Option<f64>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },

    /// Delete every expense
    Clear {
        /// Skip the safety check
        #[arg(long)]
        yes: bool,
    },

    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Manage monthly budgets
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },

    /// Manage savings goals
    Goals {
        #[command(subcommand)]
        action: Option<GoalsAction>,
    },

    /// Show detected recurring expenses
    Recurring,

    /// Show smart insights
    Insights,

    /// Show the financial health score
    Health,

    /// Show dashboard summary
    Dashboard,

    /// Export expenses to CSV, JSON or an HTML report
    Export {
        /// Output format: csv, json, html (pdf is accepted as html)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// Output directory (defaults to the configured export directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File name without extension (defaults to expenses-YYYY-MM-DD)
        #[arg(long)]
        name: Option<String>,

        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Only these categories (repeatable)
        #[arg(short, long)]
        category: Vec<String>,

        /// Omit the CSV header row
        #[arg(long)]
        no_headers: bool,

        /// Print a preview instead of writing a file
        #[arg(long)]
        preview: bool,
    },

    /// Write a full JSON backup
    Backup {
        /// Backup file to create
        file: PathBuf,
    },

    /// Restore a full JSON backup
    Restore {
        /// Backup file to read
        file: PathBuf,

        /// Replace existing data instead of merging
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List categories
    List,

    /// Add a custom category
    Add {
        /// Category name
        name: String,

        /// Icon (emoji)
        #[arg(long, default_value = "📦")]
        icon: String,

        /// Color (hex)
        #[arg(long, default_value = "#6b7280")]
        color: String,
    },

    /// Rename a category
    Rename {
        /// Current name
        name: String,

        /// New name
        new_name: String,
    },

    /// Delete a custom category
    Delete {
        /// Category name
        name: String,
    },

    /// Restore the default categories
    Reset,
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Show this month's budget status
    Show,

    /// Set a monthly limit for a category (0 removes it)
    Set {
        /// Category name
        category: String,

        /// Monthly limit
        limit: f64,
    },

    /// Set the display currency
    Currency {
        /// ISO currency code (e.g. USD)
        code: String,
    },
}

#[derive(Subcommand)]
pub enum GoalsAction {
    /// List savings goals
    List,

    /// Add a savings goal
    Add {
        /// Goal name
        name: String,

        /// Target amount
        target: f64,

        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: NaiveDate,

        /// Amount already saved
        #[arg(long, default_value = "0")]
        current: f64,

        /// Related category
        #[arg(short, long)]
        category: Option<String>,

        /// Priority: high, medium, low
        #[arg(short, long, default_value = "medium")]
        priority: GoalPriority,
    },

    /// Record the amount saved so far
    Progress {
        /// Goal ID
        id: String,

        /// Amount saved so far
        amount: f64,
    },

    /// Delete a savings goal
    Delete {
        /// Goal ID
        id: String,
    },
}
