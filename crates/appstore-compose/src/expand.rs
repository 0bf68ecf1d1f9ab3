//! Placeholder expansion.
//!
//! Two flavours exist:
//!
//! - `$NAME` / `${NAME}` variable references in human-readable tips, expanded
//!   against the settings snapshot. Unknown names stay as written.
//! - The fixed service placeholders `$public_ip`, `$default_pwd` and
//!   `$domain`, substituted into commands, environment and labels.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::ServiceConfig;
use crate::settings::DeploySettings;

static VAR_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)").unwrap()
});

static SERVICE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(public_ip|default_pwd|domain)").unwrap());

/// Expand `$NAME` and `${NAME}` references in a single left-to-right pass.
///
/// Substituted values are not rescanned, so a value containing `$OTHER`
/// comes out literally.
pub fn expand_vars<'a>(text: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    VAR_REFERENCE
        .replace_all(text, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            match lookup(name) {
                Some(value) => value.to_owned(),
                None => caps[0].to_owned(),
            }
        })
        .into_owned()
}

/// The fixed service placeholders with the values they resolve to.
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    pairs: Vec<(&'static str, String)>,
}

impl Placeholders {
    /// Placeholders whose setting is non-empty.
    pub fn from_settings(settings: &DeploySettings) -> Self {
        let candidates = [
            ("public_ip", settings.public_ip()),
            ("default_pwd", settings.default_password()),
            ("domain", settings.domain()),
        ];
        Self {
            pairs: candidates
                .into_iter()
                .filter_map(|(token, value)| value.map(|v| (token, v.to_owned())))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Substitute every known placeholder in `text` in a single pass.
    ///
    /// Substituted values are not rescanned.
    pub fn apply(&self, text: &str) -> String {
        SERVICE_PLACEHOLDER
            .replace_all(text, |caps: &Captures<'_>| {
                self.pairs
                    .iter()
                    .find(|(name, _)| *name == &caps[1])
                    .map_or_else(|| caps[0].to_owned(), |(_, value)| value.clone())
            })
            .into_owned()
    }

    /// Substitute placeholders in a service's command, entrypoint,
    /// environment values and label values.
    pub fn apply_to_service(&self, service: &mut ServiceConfig) {
        if self.is_empty() {
            return;
        }
        if let Some(command) = service.command.as_mut() {
            command.map_strings(|s| self.apply(s));
        }
        if let Some(entrypoint) = service.entrypoint.as_mut() {
            entrypoint.map_strings(|s| self.apply(s));
        }
        for value in service.environment.values_mut().flatten() {
            *value = self.apply(value);
        }
        for value in service.labels.values_mut() {
            *value = self.apply(value);
        }
    }
}
