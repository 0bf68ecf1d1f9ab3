//! Categories command

use std::path::Path;

use appstore_catalog::catalog_categories;
use colored::Colorize;

use crate::error::Result;
use crate::store::load_catalog;

/// Run the categories command
pub fn run_categories(store: &Path, json: bool) -> Result<()> {
    let catalog = load_catalog(store)?;
    let categories = catalog_categories(&catalog);

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    println!("{}", "Categories".bold());
    println!();
    for category in &categories {
        println!(
            "  {:>3}  {:<20} {}",
            category.id,
            category.name.cyan(),
            category.count
        );
    }
    Ok(())
}
