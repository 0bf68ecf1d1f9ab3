//! Catalog filtering.
//!
//! Each filter returns a new catalog holding the matching entries. Filters
//! that read store metadata drop entries whose metadata cannot be resolved.

use std::collections::BTreeSet;

use crate::Catalog;
use crate::store_info::{AuthorType, StoreInfo};

/// Criteria for [`CatalogFilter`]. `None` (or an empty string) disables a
/// criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Category name, matched case-insensitively.
    pub category: Option<String>,
    /// `official`, `by_casaos` or `community`. Anything else matches nothing.
    pub author_type: Option<String>,
    /// Architecture of the host the apps would run on.
    pub architecture: Option<String>,
    /// Keep only these store app ids.
    pub recommended: Option<BTreeSet<String>>,
}

impl CatalogQuery {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_author_type(mut self, author_type: impl Into<String>) -> Self {
        self.author_type = Some(author_type.into());
        self
    }

    pub fn with_architecture(mut self, architecture: impl Into<String>) -> Self {
        self.architecture = Some(architecture.into());
        self
    }

    pub fn with_recommended<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommended = Some(ids.into_iter().map(Into::into).collect());
        self
    }
}

/// Applies a [`CatalogQuery`] to a catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogFilter<'q> {
    query: &'q CatalogQuery,
}

impl<'q> CatalogFilter<'q> {
    pub fn new(query: &'q CatalogQuery) -> Self {
        Self { query }
    }

    /// Entries matching every enabled criterion.
    pub fn apply(&self, catalog: &Catalog) -> Catalog {
        let mut result = match &self.query.recommended {
            Some(ids) => by_ids(catalog, ids),
            None => catalog.clone(),
        };
        if let Some(category) = non_empty(&self.query.category) {
            result = by_category(&result, category);
        }
        if let Some(author_type) = non_empty(&self.query.author_type) {
            result = by_author_type(&result, author_type);
        }
        if let Some(arch) = non_empty(&self.query.architecture) {
            result = by_architecture(&result, arch);
        }
        result
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Entries whose category equals `category`, ignoring case. An empty
/// `category` returns the catalog unchanged.
pub fn by_category(catalog: &Catalog, category: &str) -> Catalog {
    if category.is_empty() {
        return catalog.clone();
    }
    retain_resolved(catalog, |info| info.category().eq_ignore_ascii_case(category))
}

/// Entries published by the given author class.
///
/// An unrecognised class yields an empty catalog.
pub fn by_author_type(catalog: &Catalog, author_type: &str) -> Catalog {
    let Some(wanted) = AuthorType::parse(author_type) else {
        tracing::warn!(author_type = %author_type, "Unknown author type, nothing matches");
        return Catalog::new();
    };
    retain_resolved(catalog, |info| info.author_type() == wanted)
}

/// Entries that run on `arch`. Entries without an architecture list run
/// everywhere.
pub fn by_architecture(catalog: &Catalog, arch: &str) -> Catalog {
    retain_resolved(catalog, |info| info.supports_architecture(arch))
}

/// Entries whose store app id is in `ids`.
pub fn by_ids(catalog: &Catalog, ids: &BTreeSet<String>) -> Catalog {
    catalog
        .iter()
        .filter(|(id, _)| ids.contains(id.as_str()))
        .map(|(id, app)| (id.clone(), app.clone()))
        .collect()
}

fn retain_resolved(catalog: &Catalog, keep: impl Fn(&StoreInfo) -> bool) -> Catalog {
    catalog
        .iter()
        .filter_map(|(id, app)| match StoreInfo::from_app(app) {
            Ok(info) => keep(&info).then(|| (id.clone(), app.clone())),
            Err(e) => {
                tracing::warn!(app = %id, error = %e, "Dropping unresolvable catalog entry");
                None
            }
        })
        .collect()
}
