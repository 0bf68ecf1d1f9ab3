//! Upgrade detection for installed apps.

use appstore_compose::ComposeApp;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store_info::StoreInfo;

/// Floating tags whose image can move without the tag changing.
pub const DEFAULT_DIGEST_TAGS: [&str; 1] = ["latest"];

/// What the upgrade detector needs from the app store.
pub trait AppStoreQuery {
    /// The published manifest for a store app id.
    fn catalog_app(&self, store_app_id: &str) -> Option<&ComposeApp>;

    /// Whether an update of the installed app is already running.
    fn is_updating(&self, app_name: &str) -> bool;

    /// Whether a newer image exists for the installed app, by digest or tag.
    fn is_update_available(&self, installed: &ComposeApp) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeStatus {
    Idle,
    Updating,
}

/// An installed app with an upgrade waiting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradableAppInfo {
    /// Title map of the installed app, as a JSON string.
    pub title: String,
    /// Tag the app would be upgraded to.
    pub version: String,
    pub store_app_id: String,
    pub status: UpgradeStatus,
    pub icon: String,
}

/// Finds installed apps with an upgrade waiting.
pub struct UpgradeDetector<'q, Q: AppStoreQuery> {
    store: &'q Q,
    digest_tags: Vec<String>,
}

impl<'q, Q: AppStoreQuery> UpgradeDetector<'q, Q> {
    pub fn new(store: &'q Q) -> Self {
        Self {
            store,
            digest_tags: DEFAULT_DIGEST_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Replace the set of floating tags compared by digest.
    pub fn with_digest_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.digest_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Upgrade candidates among `installed`, sorted by title.
    ///
    /// Apps whose metadata, tags or catalog entry cannot be resolved are
    /// skipped.
    pub fn detect<'a>(&self, installed: impl IntoIterator<Item = &'a ComposeApp>) -> Vec<UpgradableAppInfo> {
        let mut candidates: Vec<UpgradableAppInfo> = installed
            .into_iter()
            .filter_map(|app| match self.candidate(app) {
                Ok(candidate) => candidate,
                Err(e) => {
                    tracing::warn!(app = %app.name, error = %e, "Skipping installed app");
                    None
                }
            })
            .collect();
        candidates.sort_by(|a, b| a.title.cmp(&b.title));
        candidates
    }

    fn candidate(&self, app: &ComposeApp) -> Result<Option<UpgradableAppInfo>> {
        let info = StoreInfo::from_app(app)?;
        let store_app_id = info.store_app_id().to_owned();

        let installed_tag = app.main_tag()?;
        let Some(published) = self.store.catalog_app(&store_app_id) else {
            tracing::debug!(app = %app.name, store_app_id = %store_app_id, "Not in catalog");
            return Ok(None);
        };
        let catalog_tag = published.main_tag()?;

        if !self.store.is_update_available(app) {
            tracing::debug!(app = %app.name, tag = %installed_tag, "Up to date");
            return Ok(None);
        }

        let version = if self.digest_tags.contains(&installed_tag) {
            installed_tag
        } else {
            catalog_tag
        };
        let status = if self.store.is_updating(&app.name) {
            UpgradeStatus::Updating
        } else {
            UpgradeStatus::Idle
        };
        let title = serde_json::to_string(&info.title).unwrap_or_else(|e| {
            tracing::warn!(app = %app.name, error = %e, "Could not encode title");
            "unknown".to_owned()
        });

        Ok(Some(UpgradableAppInfo {
            title,
            version,
            store_app_id,
            status,
            icon: info.icon.unwrap_or_default(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    struct Store {
        catalog: BTreeMap<String, ComposeApp>,
        updating: BTreeSet<String>,
    }

    impl AppStoreQuery for Store {
        fn catalog_app(&self, store_app_id: &str) -> Option<&ComposeApp> {
            self.catalog.get(store_app_id)
        }

        fn is_updating(&self, app_name: &str) -> bool {
            self.updating.contains(app_name)
        }

        fn is_update_available(&self, installed: &ComposeApp) -> bool {
            installed.main_tag().ok().as_deref() != Some("2")
        }
    }

    fn app(name: &str, title: &str, tag: &str) -> ComposeApp {
        ComposeApp::from_yaml(&format!(
            "name: {name}\nservices:\n  {name}:\n    image: example/{name}:{tag}\nx-casaos:\n  icon: {name}.png\n  title:\n    en_us: {title}\n"
        ))
        .unwrap()
    }

    fn store() -> Store {
        Store {
            catalog: [("web", "Web", "2"), ("db", "Db", "2")]
                .into_iter()
                .map(|(n, t, tag)| (n.to_string(), app(n, t, tag)))
                .collect(),
            updating: BTreeSet::from(["db".to_string()]),
        }
    }

    #[test]
    fn test_reports_catalog_tag_and_status() {
        let store = store();
        let installed = [app("web", "Web", "1"), app("db", "Db", "1")];
        let result = UpgradeDetector::new(&store).detect(&installed);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].title, r#"{"en_us":"Db"}"#);
        assert_eq!(result[0].status, UpgradeStatus::Updating);
        assert_eq!(result[1].title, r#"{"en_us":"Web"}"#);
        assert_eq!(result[1].version, "2");
        assert_eq!(result[1].status, UpgradeStatus::Idle);
        assert_eq!(result[1].icon, "web.png");
    }

    #[test]
    fn test_digest_pinned_tag_reports_installed_tag() {
        let store = store();
        let installed = [app("web", "Web", "latest")];
        let result = UpgradeDetector::new(&store).detect(&installed);
        assert_eq!(result[0].version, "latest");

        let result = UpgradeDetector::new(&store)
            .with_digest_tags(["stable"])
            .detect(&installed);
        assert_eq!(result[0].version, "2");
    }

    #[test]
    fn test_up_to_date_apps_are_not_listed() {
        let store = store();
        let installed = [app("web", "Web", "2")];
        assert!(UpgradeDetector::new(&store).detect(&installed).is_empty());
    }
}
