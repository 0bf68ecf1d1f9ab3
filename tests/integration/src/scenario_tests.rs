//! Scenario tests across the catalog and the manifest adapter.
//!
//! Each scenario starts from an on-disk store built with [`TestStore`],
//! loads it the way a store service would, and checks what an end user
//! would see.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;

use appstore_catalog::{
    AppStoreQuery, Catalog, CatalogFilter, CatalogQuery, UpgradeDetector, catalog_categories,
    catalog_listing, installed_store_app_ids,
};
use appstore_compose::{ComposeApp, DeploySettings, ManifestAdapter};
use appstore_test_utils::{TestStore, fixtures};
use pretty_assertions::assert_eq;
use rstest::rstest;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn load_store(store: &TestStore) -> Catalog {
    let apps = store.root().join("Apps");
    let mut catalog = Catalog::new();
    for entry in fs::read_dir(apps).unwrap() {
        let entry = entry.unwrap();
        let id = entry.file_name().to_string_lossy().into_owned();
        let yaml = fs::read_to_string(store.app_file(&id)).unwrap();
        catalog.insert(id, ComposeApp::from_yaml(&yaml).unwrap());
    }
    catalog
}

fn deployment() -> DeploySettings {
    DeploySettings::from_pairs([
        ("DATA_ROOT", "/mnt/pool"),
        ("REF_NET", "casaos-proxy"),
        ("REF_DOMAIN", "home.example.com"),
        ("REF_SCHEME", "https"),
        ("REF_PORT", "443"),
        ("REF_IP", "192.168.1.2"),
        ("REF_DEFAULT_PWD", "casaos"),
        ("PUID", "1000"),
        ("PGID", "1000"),
    ])
}

struct Inventory<'a> {
    catalog: &'a Catalog,
    updating: BTreeSet<String>,
    outdated: BTreeSet<String>,
}

impl AppStoreQuery for Inventory<'_> {
    fn catalog_app(&self, store_app_id: &str) -> Option<&ComposeApp> {
        self.catalog.get(store_app_id)
    }

    fn is_updating(&self, app_name: &str) -> bool {
        self.updating.contains(app_name)
    }

    fn is_update_available(&self, installed: &ComposeApp) -> bool {
        self.outdated.contains(&installed.name)
    }
}

// =============================================================================
// Scenarios
// =============================================================================

/// Browsing the store on an arm board: only arm-capable apps are offered,
/// and every offered app adapts cleanly to the board's deployment.
#[test]
fn scenario_browse_and_install_on_arm() {
    let store = TestStore::with_all_fixtures();
    let catalog = load_store(&store);
    let settings = deployment();

    let query = CatalogQuery::default().with_architecture("arm");
    let offered = CatalogFilter::new(&query).apply(&catalog);
    assert_eq!(
        offered.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["homeassistant", "nextcloud", "syncthing"]
    );

    let adapter = ManifestAdapter::new(&settings);
    for (id, app) in &offered {
        let adapted = adapter.adapt(app);
        assert!(matches!(adapted, Cow::Owned(_)), "{id} was not adapted");
        assert_eq!(adapted.name, app.name);

        for service in &adapted.services {
            for volume in &service.volumes {
                assert!(
                    !volume.source.starts_with("/DATA/"),
                    "{id}/{}: {} still under /DATA",
                    service.name,
                    volume.source
                );
            }
        }
        let scheme = adapted.extension().unwrap()["scheme"].as_str();
        assert!(scheme.is_some(), "{id} has no scheme");
    }

    // The author-declared scheme survives.
    let nextcloud = adapter.adapt(&offered["nextcloud"]);
    assert_eq!(nextcloud.extension().unwrap()["scheme"].as_str(), Some("https"));
    let trusted = nextcloud.service("nextcloud").unwrap().environment["NEXTCLOUD_TRUSTED_DOMAINS"].clone();
    assert_eq!(trusted.as_deref(), Some("home.example.com 192.168.1.2"));
}

/// A broken manifest in the store never hides the rest of the store.
#[test]
fn scenario_broken_entry_is_isolated() {
    let store = TestStore::with_all_fixtures();
    let catalog = load_store(&store);

    let listing = catalog_listing(&catalog);
    assert_eq!(listing.len(), catalog.len() - 1);

    let categories = catalog_categories(&catalog);
    assert_eq!(categories[0].count, listing.len());

    let adapted = ManifestAdapter::new(&deployment()).adapt(&catalog["broken"]);
    assert!(matches!(adapted, Cow::Borrowed(_)));
}

/// Host-networked apps keep their network mode and published ports.
#[test]
fn scenario_host_network_app_untouched_by_network_override() {
    let store = TestStore::with_all_fixtures();
    let catalog = load_store(&store);
    let settings = deployment();

    let adapted = ManifestAdapter::new(&settings).adapt(&catalog["homeassistant"]);
    let service = &adapted.services[0];
    assert_eq!(service.network_mode.as_deref(), Some("host"));
    assert!(service.networks.is_empty());
    assert_eq!(service.user.as_deref(), Some("1000:1000"));
    assert_eq!(
        adapted.extension().unwrap()["hostname"].as_str(),
        Some("8123-homeassistant-home.example.com")
    );
}

/// Upgrade listing over an installed inventory.
#[rstest]
#[case(&["jellyfin", "nextcloud"], &[], vec![("jellyfin", "idle"), ("nextcloud", "idle")])]
#[case(&["syncthing"], &["syncthing"], vec![("syncthing", "updating")])]
#[case(&[], &[], vec![])]
fn scenario_upgrade_listing(
    #[case] outdated: &[&str],
    #[case] updating: &[&str],
    #[case] expected: Vec<(&str, &str)>,
) {
    let store = TestStore::with_all_fixtures();
    let catalog = load_store(&store);
    let installed: Vec<ComposeApp> = catalog.values().cloned().collect();

    let inventory = Inventory {
        catalog: &catalog,
        updating: updating.iter().map(|s| s.to_string()).collect(),
        outdated: outdated.iter().map(|s| s.to_string()).collect(),
    };
    let upgrades = UpgradeDetector::new(&inventory).detect(&installed);

    let rows: Vec<(String, String)> = upgrades
        .iter()
        .map(|u| {
            let status = serde_yaml::to_value(u.status).unwrap();
            (u.store_app_id.clone(), status.as_str().unwrap().to_string())
        })
        .collect();
    let expected: Vec<(String, String)> = expected
        .into_iter()
        .map(|(id, status)| (id.to_string(), status.to_string()))
        .collect();
    assert_eq!(rows, expected);
}

/// The installed id listing skips apps without store metadata.
#[test]
fn scenario_installed_ids() {
    let store = TestStore::with_all_fixtures();
    let catalog = load_store(&store);
    let ids = installed_store_app_ids(catalog.values());
    assert_eq!(ids, vec!["homeassistant", "jellyfin", "nextcloud", "syncthing"]);
}

/// Adaptation of the whole store is deterministic.
#[test]
fn scenario_adaptation_is_deterministic() {
    let store = TestStore::with_all_fixtures();
    let catalog = load_store(&store);
    let settings = deployment();
    let adapter = ManifestAdapter::new(&settings);

    let first: BTreeMap<&str, String> = catalog
        .iter()
        .map(|(id, app)| (id.as_str(), adapter.adapt(app).to_yaml().unwrap()))
        .collect();
    let second: BTreeMap<&str, String> = catalog
        .iter()
        .map(|(id, app)| (id.as_str(), adapter.adapt(app).to_yaml().unwrap()))
        .collect();
    assert_eq!(first, second);
}
