//! Store metadata of a catalog entry.

use std::collections::BTreeMap;
use std::fmt;

use appstore_compose::model::lenient_string;
use appstore_compose::{ComposeApp, ServiceConfig};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Author name the platform team publishes under.
pub const PLATFORM_AUTHOR: &str = "CasaOS Team";

/// Who published an app, relative to who develops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorType {
    /// Published by the app's own developer.
    Official,
    /// Packaged by the platform team.
    ByCasaos,
    /// Packaged by anyone else.
    Community,
    /// No author declared. Never matches a filter.
    Unknown,
}

impl AuthorType {
    /// Classify an author against the app's developer.
    pub fn classify(author: &str, developer: &str) -> Self {
        let author = author.trim();
        if author.is_empty() {
            AuthorType::Unknown
        } else if author.eq_ignore_ascii_case(developer.trim()) {
            AuthorType::Official
        } else if author.eq_ignore_ascii_case(PLATFORM_AUTHOR) {
            AuthorType::ByCasaos
        } else {
            AuthorType::Community
        }
    }

    /// Parse a filter value. Only the three published classes are accepted.
    pub fn parse(value: &str) -> Option<Self> {
        [
            AuthorType::Official,
            AuthorType::ByCasaos,
            AuthorType::Community,
        ]
        .into_iter()
        .find(|t| t.as_str().eq_ignore_ascii_case(value.trim()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorType::Official => "official",
            AuthorType::ByCasaos => "by_casaos",
            AuthorType::Community => "community",
            AuthorType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AuthorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation metadata read from a manifest's `x-casaos` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreInfo {
    /// Language code to title.
    #[serde(default)]
    pub title: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tagline: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub description: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub icon: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub author: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub developer: Option<String>,

    /// Supported CPU architectures. `None` means all of them.
    #[serde(default)]
    pub architectures: Option<Vec<String>>,

    /// Name of the main service.
    #[serde(default, deserialize_with = "lenient_string")]
    pub main: Option<String>,

    /// Store id; the manifest name when the block does not set one.
    #[serde(default, deserialize_with = "lenient_string")]
    pub store_app_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub port_map: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub scheme: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub index: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Value>,
}

impl StoreInfo {
    /// Read the store metadata of `app`.
    ///
    /// Fails when the block is missing or malformed, or when `main` names a
    /// service the manifest does not define.
    pub fn from_app(app: &ComposeApp) -> Result<Self> {
        let raw = app.extension().ok_or_else(|| Error::MissingStoreInfo {
            app: app.name.clone(),
        })?;
        let invalid = |reason: String| appstore_compose::Error::InvalidExtension {
            app: app.name.clone(),
            reason,
        };
        if !raw.is_mapping() {
            return Err(invalid("expected a mapping".to_owned()).into());
        }
        let mut info: StoreInfo =
            serde_yaml::from_value(raw.clone()).map_err(|e| invalid(e.to_string()))?;

        if let Some(main) = info.main.as_deref().filter(|m| !m.is_empty()) {
            if app.service(main).is_none() {
                return Err(Error::MainServiceNotFound {
                    app: app.name.clone(),
                    service: main.to_owned(),
                });
            }
        }
        if info.store_app_id.as_deref().is_none_or(str::is_empty) {
            info.store_app_id = Some(app.name.clone());
        }

        Ok(info)
    }

    pub fn author_type(&self) -> AuthorType {
        AuthorType::classify(
            self.author.as_deref().unwrap_or_default(),
            self.developer.as_deref().unwrap_or_default(),
        )
    }

    pub fn store_app_id(&self) -> &str {
        self.store_app_id.as_deref().unwrap_or_default()
    }

    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or_default()
    }

    /// Whether the app runs on `arch`. An absent or empty list supports all.
    pub fn supports_architecture(&self, arch: &str) -> bool {
        match self.architectures.as_deref() {
            None | Some([]) => true,
            Some(archs) => archs.iter().any(|a| a.eq_ignore_ascii_case(arch)),
        }
    }

    /// The main service of `app` as declared by this metadata.
    pub fn main_service<'a>(&self, app: &'a ComposeApp) -> Result<&'a ServiceConfig> {
        match self.main.as_deref().filter(|m| !m.is_empty()) {
            Some(main) => app.service(main).ok_or_else(|| Error::MainServiceNotFound {
                app: app.name.clone(),
                service: main.to_owned(),
            }),
            None => Ok(app.main_service()?),
        }
    }
}
