//! Upgradable command

use std::collections::BTreeSet;
use std::path::Path;

use appstore_catalog::{AppStoreQuery, Catalog, StoreInfo, UpgradeDetector, UpgradeStatus};
use appstore_compose::ComposeApp;
use appstore_compose::image::DEFAULT_TAG;
use colored::Colorize;

use crate::error::Result;
use crate::store::{load_catalog, load_installed};

/// App store view backed by a store directory.
///
/// Without registry access an update is only detectable by tag: it is
/// available when the installed main tag differs from the catalog one and
/// is not a floating tag.
pub struct DirectoryStore {
    catalog: Catalog,
    updating: BTreeSet<String>,
    floating_tags: BTreeSet<String>,
}

impl DirectoryStore {
    pub fn new(catalog: Catalog, updating: &[String], floating_tags: &[String]) -> Self {
        let floating_tags = if floating_tags.is_empty() {
            BTreeSet::from([DEFAULT_TAG.to_string()])
        } else {
            floating_tags.iter().cloned().collect()
        };
        Self {
            catalog,
            updating: updating.iter().cloned().collect(),
            floating_tags,
        }
    }
}

impl AppStoreQuery for DirectoryStore {
    fn catalog_app(&self, store_app_id: &str) -> Option<&ComposeApp> {
        self.catalog.get(store_app_id)
    }

    fn is_updating(&self, app_name: &str) -> bool {
        self.updating.contains(app_name)
    }

    fn is_update_available(&self, installed: &ComposeApp) -> bool {
        let Ok(info) = StoreInfo::from_app(installed) else {
            return false;
        };
        let Some(published) = self.catalog_app(info.store_app_id()) else {
            return false;
        };
        match (installed.main_tag(), published.main_tag()) {
            (Ok(current), Ok(latest)) => {
                if self.floating_tags.contains(&current) {
                    tracing::debug!(app = %installed.name, tag = %current, "Floating tag needs a digest check");
                    return false;
                }
                current != latest
            }
            _ => false,
        }
    }
}

/// Run the upgradable command
pub fn run_upgradable(
    store: &Path,
    installed: &Path,
    updating: &[String],
    digest_tags: &[String],
    json: bool,
) -> Result<()> {
    let catalog = load_catalog(store)?;
    let installed = load_installed(installed)?;

    let store = DirectoryStore::new(catalog, updating, digest_tags);
    let mut detector = UpgradeDetector::new(&store);
    if !digest_tags.is_empty() {
        detector = detector.with_digest_tags(digest_tags.iter().cloned());
    }
    let upgrades = detector.detect(&installed);

    if json {
        println!("{}", serde_json::to_string_pretty(&upgrades)?);
        return Ok(());
    }

    if upgrades.is_empty() {
        println!("{}", "All apps are up to date.".green());
        return Ok(());
    }

    println!("{}", "Upgradable Apps".bold());
    println!();
    for upgrade in &upgrades {
        let status = match upgrade.status {
            UpgradeStatus::Idle => "idle".dimmed(),
            UpgradeStatus::Updating => "updating".yellow(),
        };
        println!(
            "  {:<20} {:<16} {}",
            upgrade.store_app_id.green(),
            upgrade.version,
            status
        );
    }
    Ok(())
}
