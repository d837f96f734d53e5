//! Category command implementations

use anyhow::Result;
use spendwise_core::{CategoryUpdate, CustomCategory, Database};

fn find_category(db: &Database, name: &str) -> Result<CustomCategory> {
    db.get_category_by_name(name)?
        .ok_or_else(|| anyhow::anyhow!("Category not found: {}", name))
}

pub fn cmd_categories_list(db: &Database) -> Result<()> {
    let categories = db.list_categories()?;

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────");

    for category in categories {
        let marker = if category.is_default { "" } else { " (custom)" };
        println!(
            "   {} {:16} {}{}",
            category.icon, category.name, category.color, marker
        );
    }

    Ok(())
}

pub fn cmd_categories_add(db: &Database, name: &str, icon: &str, color: &str) -> Result<()> {
    let category = db.add_category(name, icon, color)?;
    println!("✅ Added category {} {}", category.icon, category.name);
    println!("   Set a budget with: spendwise budget set \"{}\" <limit>", category.name);
    Ok(())
}

/// Rename a category
///
/// Stored expenses keep the old spelling; only the registry changes.
pub fn cmd_categories_rename(db: &Database, name: &str, new_name: &str) -> Result<()> {
    let category = find_category(db, name)?;
    let update = CategoryUpdate {
        name: Some(new_name.to_string()),
        ..Default::default()
    };

    let renamed = db
        .update_category(&category.id, &update)?
        .ok_or_else(|| anyhow::anyhow!("Category not found: {}", name))?;

    println!("✅ Renamed {} to {}", category.name, renamed.name);
    Ok(())
}

pub fn cmd_categories_delete(db: &Database, name: &str) -> Result<()> {
    let category = find_category(db, name)?;
    db.delete_category(&category.id)?;
    println!("✅ Deleted category {}", category.name);
    Ok(())
}

pub fn cmd_categories_reset(db: &Database) -> Result<()> {
    db.reset_categories()?;
    println!("✅ Categories reset to defaults");
    Ok(())
}
