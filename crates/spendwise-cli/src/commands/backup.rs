//! Full backup and restore commands

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use spendwise_core::{Database, FullBackup};

pub fn cmd_backup(db: &Database, output: &Path) -> Result<()> {
    // Check output doesn't already exist
    if output.exists() {
        anyhow::bail!(
            "Output file already exists: {}\nUse a different filename or remove the existing file.",
            output.display()
        );
    }

    println!("📦 Exporting full database backup...");

    let backup = db.export_full()?;
    let json =
        serde_json::to_string_pretty(&backup).context("Failed to serialize backup to JSON")?;

    let mut file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    file.write_all(json.as_bytes())?;

    println!("✅ Full backup exported to: {}", output.display());
    println!("   Version: {}", backup.metadata.version);
    println!("   Total records: {}", backup.metadata.total_records);
    println!();
    println!("   Expenses: {}", backup.expenses.len());
    println!("   Goals: {}", backup.goals.len());
    println!("   Categories: {}", backup.categories.len());
    println!("   Budgets: {}", backup.budgets.budgets.len());

    Ok(())
}

pub fn cmd_restore(db: &Database, input: &Path, clear: bool) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Backup file not found: {}", input.display());
    }

    let mut file = File::open(input)
        .with_context(|| format!("Failed to open backup file: {}", input.display()))?;
    let mut json = String::new();
    file.read_to_string(&mut json)
        .context("Failed to read backup file")?;

    let backup: FullBackup =
        serde_json::from_str(&json).context("Failed to parse backup file as JSON")?;

    println!("📦 Importing full backup from: {}", input.display());
    println!("   Version: {}", backup.metadata.version);
    println!("   Created: {}", backup.metadata.created_at);
    if clear {
        println!("   Mode: replace existing data");
    } else {
        println!("   Mode: merge with existing data");
    }
    println!();

    let stats = db.import_full(&backup, clear)?;

    println!("✅ Restore complete");
    println!("   Expenses: {}", stats.expenses);
    println!("   Goals: {}", stats.goals);
    println!("   Categories: {}", stats.categories);
    println!("   Budgets: {}", stats.budgets);

    Ok(())
}
