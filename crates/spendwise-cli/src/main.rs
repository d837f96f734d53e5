//! Spendwise CLI - Personal expense tracker
//!
//! Usage:
//!   spendwise init                          Initialize database
//!   spendwise add 12.50 "Lunch" -c Food     Record an expense
//!   spendwise insights                      Show smart insights
//!   spendwise export --format json          Export expenses

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use spendwise_core::ExpenseFilters;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let today = commands::reference_date(cli.today);
    let now = commands::reference_now(cli.today);
    let db = commands::open_db(cli.db.as_deref(), &config)?;

    match cli.command {
        Commands::Init => commands::cmd_init(&db, &config),
        Commands::Add {
            amount,
            description,
            category,
            date,
        } => commands::cmd_add(&db, &amount, &description, &category, date.as_deref(), today),
        Commands::List {
            category,
            from,
            to,
            preset,
            search,
            min,
            max,
            limit,
        } => {
            let filters = ExpenseFilters::new()
                .categories(category)
                .date_range(from, to)
                .preset(preset)
                .search(search)
                .amount_range(min, max);
            commands::cmd_list(&db, &filters, today, limit)
        }
        Commands::Edit {
            id,
            amount,
            description,
            category,
            date,
        } => commands::cmd_edit(
            &db,
            &id,
            amount,
            description.as_deref(),
            category.as_deref(),
            date,
        ),
        Commands::Delete { id } => commands::cmd_delete(&db, &id),
        Commands::Clear { yes } => commands::cmd_clear(&db, yes),
        Commands::Categories { action } => match action {
            None | Some(CategoriesAction::List) => commands::cmd_categories_list(&db),
            Some(CategoriesAction::Add { name, icon, color }) => {
                commands::cmd_categories_add(&db, &name, &icon, &color)
            }
            Some(CategoriesAction::Rename { name, new_name }) => {
                commands::cmd_categories_rename(&db, &name, &new_name)
            }
            Some(CategoriesAction::Delete { name }) => commands::cmd_categories_delete(&db, &name),
            Some(CategoriesAction::Reset) => commands::cmd_categories_reset(&db),
        },
        Commands::Budget { action } => match action {
            None | Some(BudgetAction::Show) => commands::cmd_budget_show(&db, today),
            Some(BudgetAction::Set { category, limit }) => {
                commands::cmd_budget_set(&db, &category, limit)
            }
            Some(BudgetAction::Currency { code }) => commands::cmd_budget_currency(&db, &code),
        },
        Commands::Goals { action } => match action {
            None | Some(GoalsAction::List) => commands::cmd_goals_list(&db, today),
            Some(GoalsAction::Add {
                name,
                target,
                deadline,
                current,
                category,
                priority,
            }) => commands::cmd_goals_add(
                &db,
                &name,
                target,
                deadline,
                current,
                category.as_deref(),
                priority,
            ),
            Some(GoalsAction::Progress { id, amount }) => {
                commands::cmd_goals_progress(&db, &id, amount)
            }
            Some(GoalsAction::Delete { id }) => commands::cmd_goals_delete(&db, &id),
        },
        Commands::Recurring => commands::cmd_recurring(&db, today),
        Commands::Insights => commands::cmd_insights(&db, &config, today, now),
        Commands::Health => commands::cmd_health(&db, today),
        Commands::Dashboard => commands::cmd_dashboard(&db, &config, today, now),
        Commands::Export {
            format,
            output,
            name,
            from,
            to,
            category,
            no_headers,
            preview,
        } => {
            let opts = spendwise_core::ExportOptions {
                format,
                start_date: from,
                end_date: to,
                categories: category,
                include_headers: !no_headers,
                filename: name,
            };
            let dir = output.unwrap_or_else(|| config.resolved_export_dir());
            commands::cmd_export(&db, opts, &dir, preview, now)
        }
        Commands::Backup { file } => commands::cmd_backup(&db, &file),
        Commands::Restore { file, clear } => commands::cmd_restore(&db, &file, clear),
    }
}
