//! Category aggregation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Catalog;
use crate::store_info::StoreInfo;

/// Name of the synthetic category that counts every entry.
pub const ALL_CATEGORY: &str = "All";

/// One row of the category listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    /// Position in the listing; `All` is always 0.
    pub id: usize,
    pub name: String,
    /// Icon font glyph name.
    pub font: String,
    pub description: String,
    pub count: usize,
}

impl CategoryInfo {
    pub fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
            ..Default::default()
        }
    }

    pub fn with_display(mut self, font: impl Into<String>, description: impl Into<String>) -> Self {
        self.font = font.into();
        self.description = description.into();
        self
    }
}

/// Number of resolvable entries per category name.
pub fn category_counts(catalog: &Catalog) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for (id, app) in catalog {
        match StoreInfo::from_app(app) {
            Ok(info) if !info.category().is_empty() => {
                *counts.entry(info.category().to_owned()).or_insert(0) += 1;
            }
            Ok(_) => tracing::debug!(app = %id, "Entry has no category"),
            Err(e) => tracing::warn!(app = %id, error = %e, "Skipping unresolvable catalog entry"),
        }
    }
    counts
}

/// Sort categories by name, prepend `All` and number them.
///
/// The `All` count is the sum of the other counts. Any incoming `All` row is
/// replaced.
pub fn category_list(categories: impl IntoIterator<Item = CategoryInfo>) -> Vec<CategoryInfo> {
    let mut list: Vec<CategoryInfo> = categories
        .into_iter()
        .filter(|c| c.name != ALL_CATEGORY)
        .collect();
    list.sort_by(|a, b| a.name.cmp(&b.name));

    let total = list.iter().map(|c| c.count).sum();
    list.insert(
        0,
        CategoryInfo::new(ALL_CATEGORY, total).with_display("apps", "All apps"),
    );

    for (id, category) in list.iter_mut().enumerate() {
        category.id = id;
    }
    list
}

/// The category listing of a catalog.
pub fn catalog_categories(catalog: &Catalog) -> Vec<CategoryInfo> {
    category_list(
        category_counts(catalog)
            .into_iter()
            .map(|(name, count)| CategoryInfo::new(name, count)),
    )
}
