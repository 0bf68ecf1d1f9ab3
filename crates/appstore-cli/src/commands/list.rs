//! List command for catalog apps

use std::path::Path;

use appstore_catalog::{CatalogFilter, CatalogQuery, StoreInfo, catalog_listing};
use colored::Colorize;

use crate::error::Result;
use crate::store::load_catalog;

/// Build the catalog query from command-line flags.
pub fn build_query(
    category: Option<String>,
    author_type: Option<String>,
    arch: Option<String>,
    recommend: Vec<String>,
) -> CatalogQuery {
    CatalogQuery {
        category,
        author_type,
        architecture: arch,
        recommended: (!recommend.is_empty()).then(|| recommend.into_iter().collect()),
    }
}

/// Run the list command
pub fn run_list(store: &Path, query: &CatalogQuery, json: bool) -> Result<()> {
    let catalog = load_catalog(store)?;
    let filtered = CatalogFilter::new(query).apply(&catalog);
    let listing = catalog_listing(&filtered);

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("{}", "Available Apps".bold());
    println!();
    for (id, info) in &listing {
        println!(
            "  {:<20} {:<24} {:<14} {}",
            id.green(),
            display_title(info),
            info.category().cyan(),
            info.author_type().to_string().dimmed()
        );
    }
    println!();
    println!("{} {} apps", "Total:".dimmed(), listing.len());

    Ok(())
}

/// English title if present, else any title, else the store id.
pub fn display_title(info: &StoreInfo) -> &str {
    info.title
        .get("en_us")
        .or_else(|| info.title.values().next())
        .map(String::as_str)
        .unwrap_or_else(|| info.store_app_id())
}
