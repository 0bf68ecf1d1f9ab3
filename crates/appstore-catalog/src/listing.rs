//! Catalog and inventory listings.

use std::collections::BTreeMap;

use appstore_compose::ComposeApp;

use crate::Catalog;
use crate::store_info::StoreInfo;

/// Store metadata of every resolvable catalog entry, keyed by store app id.
pub fn catalog_listing(catalog: &Catalog) -> BTreeMap<String, StoreInfo> {
    catalog
        .iter()
        .filter_map(|(id, app)| match StoreInfo::from_app(app) {
            Ok(info) => Some((id.clone(), info)),
            Err(e) => {
                tracing::warn!(app = %id, error = %e, "Leaving unresolvable entry out of the listing");
                None
            }
        })
        .collect()
}

/// Store app ids of installed apps, in input order. Apps without usable
/// store metadata are skipped.
pub fn installed_store_app_ids<'a>(installed: impl IntoIterator<Item = &'a ComposeApp>) -> Vec<String> {
    installed
        .into_iter()
        .filter_map(|app| match StoreInfo::from_app(app) {
            Ok(info) => Some(info.store_app_id().to_owned()),
            Err(e) => {
                tracing::warn!(app = %app.name, error = %e, "Installed app has no store metadata");
                None
            }
        })
        .collect()
}
