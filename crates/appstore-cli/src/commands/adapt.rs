//! Adapt command

use std::path::Path;

use appstore_compose::{DeploySettings, ManifestAdapter};

use crate::cli::DeployOverrides;
use crate::error::Result;
use crate::store::load_manifest;

/// Print `file` adapted to the environment snapshot plus `overrides`.
pub fn run_adapt(file: &Path, overrides: &DeployOverrides, json: bool) -> Result<()> {
    let settings = overrides.apply(DeploySettings::from_env());
    let app = load_manifest(file)?;

    let adapted = ManifestAdapter::new(&settings).adapt(&app);

    if json {
        println!("{}", serde_json::to_string_pretty(adapted.as_ref())?);
    } else {
        print!("{}", adapted.to_yaml()?);
    }
    Ok(())
}
