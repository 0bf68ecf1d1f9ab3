//! Tag command

use std::path::Path;

use crate::error::{CliError, Result};
use crate::store::load_catalog;

/// Print the stable tag of the main service, or of `service` when given.
pub fn run_tag(store: &Path, id: &str, service: Option<&str>) -> Result<()> {
    let catalog = load_catalog(store)?;
    let app = catalog
        .get(id)
        .ok_or_else(|| CliError::user(format!("app '{id}' not found in {}", store.display())))?;

    let tag = match service {
        Some(service) => app.service_tag(service)?,
        None => app.main_tag()?,
    };
    println!("{tag}");
    Ok(())
}
