//! Export command implementation

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use spendwise_core::export::{export_preview, filter_for_export, write_export};
use spendwise_core::{format_currency, Database, ExportOptions};

use super::resolve_categories;

pub fn cmd_export(
    db: &Database,
    mut opts: ExportOptions,
    dir: &Path,
    preview: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    opts.categories = resolve_categories(db, &opts.categories)?;

    let expenses = db.list_expenses()?;

    if preview {
        println!("{}", export_preview(&expenses, &opts, now)?);
        return Ok(());
    }

    let selected = filter_for_export(&expenses, &opts);
    let total: f64 = selected.iter().map(|e| e.amount).sum();

    println!("📤 Exporting {} expenses...", selected.len());
    let path = write_export(&expenses, &opts, dir, now).context("Export failed")?;

    println!("✅ Exported to: {}", path.display());
    println!("   Format: {}", opts.format.extension());
    println!("   Total amount: {}", format_currency(total));

    Ok(())
}
