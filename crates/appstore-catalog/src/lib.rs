//! Catalog curation for the app store.
//!
//! A catalog is a set of published manifests keyed by store app id. This
//! crate derives the presentation metadata of each entry ([`StoreInfo`]),
//! filters the catalog, aggregates categories and decides which installed
//! apps have an upgrade waiting.
//!
//! Every operation here tolerates broken entries: an entry whose metadata
//! cannot be resolved is logged and left out, never fatal to the whole
//! listing.

pub mod category;
pub mod error;
pub mod filter;
pub mod listing;
pub mod store_info;
pub mod upgrade;

use std::collections::BTreeMap;

use appstore_compose::ComposeApp;

pub use category::{CategoryInfo, category_counts, category_list, catalog_categories};
pub use error::{Error, Result};
pub use filter::{CatalogFilter, CatalogQuery};
pub use listing::{catalog_listing, installed_store_app_ids};
pub use store_info::{AuthorType, StoreInfo};
pub use upgrade::{AppStoreQuery, UpgradableAppInfo, UpgradeDetector, UpgradeStatus};

/// Published manifests keyed by store app id.
pub type Catalog = BTreeMap<String, ComposeApp>;
