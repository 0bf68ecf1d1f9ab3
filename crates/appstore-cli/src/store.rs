//! On-disk app store and inventory loading.
//!
//! A store directory holds `Apps/<id>/docker-compose.yml`; an installed-apps
//! directory holds `<name>/docker-compose.yml`. A manifest that fails to
//! parse is logged and skipped so one broken app never hides the rest.

use std::fs;
use std::path::Path;

use appstore_catalog::Catalog;
use appstore_compose::ComposeApp;

use crate::error::{CliError, Result};

/// Directory of a store that holds the app directories.
pub const APPS_DIR: &str = "Apps";

/// Manifest file name inside an app directory.
pub const COMPOSE_FILE: &str = "docker-compose.yml";

/// Read and parse one manifest.
pub fn load_manifest(path: &Path) -> Result<ComposeApp> {
    let content = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
    Ok(ComposeApp::from_yaml(&content)?)
}

/// Load every app of a store, keyed by directory name.
pub fn load_catalog(store: &Path) -> Result<Catalog> {
    let apps_dir = store.join(APPS_DIR);
    if !apps_dir.is_dir() {
        return Err(CliError::user(format!(
            "{} is not an app store: missing {APPS_DIR}/ directory",
            store.display()
        )));
    }
    Ok(load_apps(&apps_dir)?.into_iter().collect())
}

/// Load every installed app, in directory-name order.
pub fn load_installed(dir: &Path) -> Result<Vec<ComposeApp>> {
    Ok(load_apps(dir)?.into_iter().map(|(_, app)| app).collect())
}

fn load_apps(dir: &Path) -> Result<Vec<(String, ComposeApp)>> {
    let entries = fs::read_dir(dir).map_err(|e| CliError::io(dir, e))?;

    let mut apps = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CliError::io(dir, e))?;
        let path = entry.path().join(COMPOSE_FILE);
        if !path.is_file() {
            continue;
        }
        let id = entry.file_name().to_string_lossy().into_owned();
        match load_manifest(&path) {
            Ok(mut app) => {
                if app.name.is_empty() {
                    app.name = id.clone();
                }
                apps.push((id, app));
            }
            Err(e) => tracing::warn!(app = %id, error = %e, "Skipping unreadable manifest"),
        }
    }
    apps.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(apps)
}

/// Container platform name of the architecture this binary was built for.
pub fn host_architecture() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "arm" => "arm",
        "x86" => "386",
        "powerpc64" => "ppc64le",
        "s390x" => "s390x",
        "riscv64" => "riscv64",
        other => other,
    }
}
