//! Export functionality for expenses and full store backups
//!
//! Supports:
//! - Expense export as CSV, JSON or a printable HTML report, with date and
//!   category filtering
//! - Full JSON backup export/import covering every stored collection

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::format::format_date;
use crate::models::{BudgetSettings, CustomCategory, Expense, SavingsGoal};

/// Rows shown by a CSV preview
const CSV_PREVIEW_ROWS: usize = 5;
/// Expenses shown by a JSON preview
const JSON_PREVIEW_ITEMS: usize = 3;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    /// Printable report, the stand-in for a PDF
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Html => "html",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "html" | "pdf" => Ok(Self::Html),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

/// Options for expense export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Start date filter (inclusive)
    pub start_date: Option<NaiveDate>,
    /// End date filter (inclusive)
    pub end_date: Option<NaiveDate>,
    /// Only these categories (empty means all)
    pub categories: Vec<String>,
    /// Emit the CSV header row
    pub include_headers: bool,
    /// Base name without extension; defaults to `expenses-<date>`
    pub filename: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            start_date: None,
            end_date: None,
            categories: Vec::new(),
            include_headers: true,
            filename: None,
        }
    }
}

/// One expense as written to a JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseExport {
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Expense> for ExpenseExport {
    fn from(e: &Expense) -> Self {
        Self {
            date: e.date,
            category: e.category.clone(),
            amount: e.amount,
            description: e.description.clone(),
            created_at: e.created_at,
        }
    }
}

/// JSON export document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseExportDocument {
    pub export_date: DateTime<Utc>,
    pub total_expenses: usize,
    pub total_amount: f64,
    pub expenses: Vec<ExpenseExport>,
    #[serde(rename = "_note", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Expenses matching the export filters, newest first
pub fn filter_for_export(expenses: &[Expense], opts: &ExportOptions) -> Vec<Expense> {
    let mut filtered: Vec<Expense> = expenses
        .iter()
        .filter(|e| opts.start_date.map_or(true, |s| e.date >= s))
        .filter(|e| opts.end_date.map_or(true, |end| e.date <= end))
        .filter(|e| opts.categories.is_empty() || opts.categories.contains(&e.category))
        .cloned()
        .collect();

    // Stable, so same-day expenses keep their stored order
    filtered.sort_by(|a, b| b.date.cmp(&a.date));
    filtered
}

/// CSV with `Date,Category,Amount,Description,Created At` columns
pub fn export_csv(expenses: &[Expense], include_headers: bool) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if include_headers {
        writer.write_record(["Date", "Category", "Amount", "Description", "Created At"])?;
    }

    for expense in expenses {
        writer.write_record([
            expense.date.to_string(),
            expense.category.clone(),
            format!("{:.2}", expense.amount),
            expense.description.clone(),
            expense.created_at.date_naive().to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::InvalidData(format!("Failed to finish CSV: {}", e)))?;
    let mut csv = String::from_utf8(bytes)
        .map_err(|e| Error::InvalidData(format!("CSV is not UTF-8: {}", e)))?;

    if csv.ends_with('\n') {
        csv.pop();
    }
    Ok(csv)
}

fn export_document(expenses: &[Expense], now: DateTime<Utc>) -> ExpenseExportDocument {
    ExpenseExportDocument {
        export_date: now,
        total_expenses: expenses.len(),
        total_amount: expenses.iter().map(|e| e.amount).sum(),
        expenses: expenses.iter().map(ExpenseExport::from).collect(),
        note: None,
    }
}

/// Pretty-printed JSON document with totals
pub fn export_json(expenses: &[Expense], now: DateTime<Utc>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&export_document(expenses, now))?)
}

/// Escape text for inclusion in HTML
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Per-category `(name, count, total)` sorted by total, largest first
fn category_totals(expenses: &[Expense]) -> Vec<(String, usize, f64)> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<&str, (usize, f64)> = HashMap::new();

    for e in expenses {
        let entry = totals.entry(e.category.as_str()).or_insert_with(|| {
            order.push(e.category.clone());
            (0, 0.0)
        });
        entry.0 += 1;
        entry.1 += e.amount;
    }

    let mut rows: Vec<(String, usize, f64)> = order
        .into_iter()
        .map(|name| {
            let (count, total) = totals[name.as_str()];
            (name, count, total)
        })
        .collect();
    rows.sort_by(|a, b| b.2.total_cmp(&a.2));
    rows
}

const REPORT_STYLE: &str = r#"
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; padding: 40px; color: #1f2937; }
    .header { text-align: center; margin-bottom: 30px; padding-bottom: 20px; border-bottom: 2px solid #e5e7eb; }
    .header h1 { font-size: 28px; margin-bottom: 8px; }
    .header p { color: #6b7280; font-size: 14px; }
    .summary { display: flex; justify-content: space-between; margin-bottom: 30px; padding: 20px; background: #f9fafb; border-radius: 8px; }
    .summary-item { text-align: center; }
    .summary-item .label { font-size: 12px; color: #6b7280; text-transform: uppercase; }
    .summary-item .value { font-size: 24px; font-weight: bold; }
    .section-title { font-size: 18px; font-weight: 600; margin: 24px 0 16px; color: #374151; }
    table { width: 100%; border-collapse: collapse; margin-bottom: 24px; }
    th { background: #f3f4f6; padding: 12px; text-align: left; font-size: 12px; text-transform: uppercase; color: #6b7280; border-bottom: 2px solid #e5e7eb; }
    td { padding: 12px; border-bottom: 1px solid #e5e7eb; font-size: 14px; }
    .amount { text-align: right; font-weight: 500; }
    .category-badge { display: inline-block; padding: 4px 8px; border-radius: 4px; font-size: 12px; background: #e5e7eb; }
    .footer { margin-top: 40px; padding-top: 20px; border-top: 1px solid #e5e7eb; text-align: center; font-size: 12px; color: #9ca3af; }
    @media print { body { padding: 20px; } }
"#;

/// Printable HTML report: summary, category breakdown and all expenses
pub fn export_html(expenses: &[Expense], today: NaiveDate) -> String {
    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    let categories = category_totals(expenses);
    let average = if expenses.is_empty() {
        0.0
    } else {
        total / expenses.len() as f64
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Expense Report</title>\n<style>");
    html.push_str(REPORT_STYLE);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str(&format!(
        "<div class=\"header\">\n<h1>Expense Report</h1>\n<p>Generated on {}</p>\n</div>\n",
        today.format("%A, %B %-d, %Y")
    ));

    html.push_str("<div class=\"summary\">\n");
    for (label, value) in [
        ("Total Expenses", expenses.len().to_string()),
        ("Total Amount", format!("${:.2}", total)),
        ("Categories", categories.len().to_string()),
        ("Avg per Expense", format!("${:.2}", average)),
    ] {
        html.push_str(&format!(
            "<div class=\"summary-item\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>\n",
            label, value
        ));
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"section-title\">Category Breakdown</div>\n<table>\n<thead><tr>");
    html.push_str("<th>Category</th><th>Transactions</th><th style=\"text-align: right\">Amount</th><th style=\"text-align: right\">% of Total</th>");
    html.push_str("</tr></thead>\n<tbody>\n");
    for (name, count, amount) in &categories {
        let share = if total > 0.0 { amount / total * 100.0 } else { 0.0 };
        html.push_str(&format!(
            "<tr><td><span class=\"category-badge\">{}</span></td><td>{}</td><td class=\"amount\">${:.2}</td><td class=\"amount\">{:.1}%</td></tr>\n",
            escape_html(name),
            count,
            amount,
            share
        ));
    }
    html.push_str("</tbody>\n</table>\n");

    html.push_str("<div class=\"section-title\">All Transactions</div>\n<table>\n<thead><tr>");
    html.push_str("<th>Date</th><th>Category</th><th>Description</th><th style=\"text-align: right\">Amount</th>");
    html.push_str("</tr></thead>\n<tbody>\n");
    for e in expenses {
        html.push_str(&format!(
            "<tr><td>{}</td><td><span class=\"category-badge\">{}</span></td><td>{}</td><td class=\"amount\">${:.2}</td></tr>\n",
            format_date(e.date),
            escape_html(&e.category),
            escape_html(&e.description),
            e.amount
        ));
    }
    html.push_str("</tbody>\n</table>\n");

    html.push_str("<div class=\"footer\"><p>Spendwise - Personal Expense Report</p></div>\n");
    html.push_str("</body>\n</html>\n");
    html
}

/// Render filtered expenses in the requested format
pub fn render_export(
    expenses: &[Expense],
    opts: &ExportOptions,
    now: DateTime<Utc>,
) -> Result<String> {
    let filtered = filter_for_export(expenses, opts);
    match opts.format {
        ExportFormat::Csv => export_csv(&filtered, opts.include_headers),
        ExportFormat::Json => export_json(&filtered, now),
        ExportFormat::Html => Ok(export_html(&filtered, now.date_naive())),
    }
}

/// Short preview of what an export would contain
pub fn export_preview(
    expenses: &[Expense],
    opts: &ExportOptions,
    now: DateTime<Utc>,
) -> Result<String> {
    let filtered = filter_for_export(expenses, opts);

    match opts.format {
        ExportFormat::Csv => {
            let shown = &filtered[..filtered.len().min(CSV_PREVIEW_ROWS)];
            let mut preview = export_csv(shown, opts.include_headers)?;
            if filtered.len() > CSV_PREVIEW_ROWS {
                preview.push_str(&format!(
                    "\n... and {} more rows",
                    filtered.len() - CSV_PREVIEW_ROWS
                ));
            }
            Ok(preview)
        }
        ExportFormat::Json => {
            let mut doc = export_document(&filtered, now);
            doc.expenses.truncate(JSON_PREVIEW_ITEMS);
            if filtered.len() > JSON_PREVIEW_ITEMS {
                doc.note = Some(format!(
                    "Showing {} of {} expenses",
                    JSON_PREVIEW_ITEMS,
                    filtered.len()
                ));
            }
            Ok(serde_json::to_string_pretty(&doc)?)
        }
        ExportFormat::Html => {
            let total: f64 = filtered.iter().map(|e| e.amount).sum();
            Ok(format!(
                "HTML Report Preview\n{}\nTotal Expenses: {}\nTotal Amount: ${:.2}\n\nOpen the file in a browser to print it.",
                "-".repeat(40),
                filtered.len(),
                total
            ))
        }
    }
}

/// `expenses-YYYY-MM-DD`
pub fn default_filename(today: NaiveDate) -> String {
    format!("expenses-{}", today.format("%Y-%m-%d"))
}

/// Write an export into `dir`, returning the file path
///
/// Content goes to a temporary file in the same directory first and is then
/// moved into place.
pub fn write_export(
    expenses: &[Expense],
    opts: &ExportOptions,
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let filtered = filter_for_export(expenses, opts);
    if filtered.is_empty() {
        return Err(Error::InvalidData(
            "No expenses to export with the selected filters".to_string(),
        ));
    }

    let content = render_export(expenses, opts, now)?;
    let base = opts
        .filename
        .clone()
        .unwrap_or_else(|| default_filename(now.date_naive()));
    let path = dir.join(format!("{}.{}", base, opts.format.extension()));

    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(&path).map_err(|e| Error::Io(e.error))?;

    info!(path = %path.display(), count = filtered.len(), format = opts.format.extension(), "Exported expenses");
    Ok(path)
}

/// Backup metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupMetadata {
    /// Application version that created the backup
    pub version: String,
    /// When the backup was created
    pub created_at: String,
    /// Total number of records in backup
    pub total_records: usize,
}

/// Full store backup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullBackup {
    pub metadata: BackupMetadata,
    pub expenses: Vec<Expense>,
    pub budgets: BudgetSettings,
    #[serde(default)]
    pub goals: Vec<SavingsGoal>,
    #[serde(default = "CustomCategory::defaults")]
    pub categories: Vec<CustomCategory>,
}

/// Import statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub expenses: usize,
    pub goals: usize,
    pub categories: usize,
    pub budgets: usize,
}

impl Database {
    /// Export every collection
    pub fn export_full(&self) -> Result<FullBackup> {
        let expenses = self.list_expenses()?;
        let budgets = self.get_budget_settings()?;
        let goals = self.list_goals()?;
        let categories = self.list_categories()?;

        let total_records = expenses.len() + goals.len() + categories.len() + budgets.budgets.len();

        Ok(FullBackup {
            metadata: BackupMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                created_at: Utc::now().to_rfc3339(),
                total_records,
            },
            expenses,
            budgets,
            goals,
            categories,
        })
    }

    /// Restore a backup
    ///
    /// With `clear_existing` every collection is replaced. Otherwise records
    /// are merged: expenses and goals whose id already exists are skipped,
    /// categories whose name already exists are skipped, and budget limits
    /// from the backup overwrite stored ones.
    pub fn import_full(&self, backup: &FullBackup, clear_existing: bool) -> Result<ImportStats> {
        if clear_existing {
            self.reset()?;
            self.replace_categories(&backup.categories)?;
            self.replace_expenses(&backup.expenses)?;
            self.replace_goals(&backup.goals)?;
            self.save_budget_settings(&backup.budgets)?;

            let stats = ImportStats {
                expenses: backup.expenses.len(),
                goals: backup.goals.len(),
                categories: backup.categories.len(),
                budgets: backup.budgets.budgets.len(),
            };
            info!(?stats, "Restored backup");
            return Ok(stats);
        }

        let mut stats = ImportStats::default();

        let mut categories = self.list_categories()?;
        for category in &backup.categories {
            if !categories
                .iter()
                .any(|c| c.name.eq_ignore_ascii_case(&category.name))
            {
                categories.push(category.clone());
                stats.categories += 1;
            }
        }
        self.replace_categories(&categories)?;

        let mut expenses = self.list_expenses()?;
        for expense in &backup.expenses {
            if !expenses.iter().any(|e| e.id == expense.id) {
                expenses.push(expense.clone());
                stats.expenses += 1;
            }
        }
        self.replace_expenses(&expenses)?;

        let mut goals = self.list_goals()?;
        for goal in &backup.goals {
            if !goals.iter().any(|g| g.id == goal.id) {
                goals.push(goal.clone());
                stats.goals += 1;
            }
        }
        self.replace_goals(&goals)?;

        let mut settings = self.get_budget_settings()?;
        for (category, limit) in &backup.budgets.budgets {
            settings.budgets.insert(category.clone(), *limit);
            stats.budgets += 1;
        }
        self.save_budget_settings(&settings)?;

        info!(?stats, "Merged backup");
        Ok(stats)
    }
}
