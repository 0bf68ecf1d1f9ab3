//! The `x-casaos` vendor extension block.
//!
//! [`AppExtension`] is the typed view of the keys adaptation touches; every
//! other key rides along in `rest`. [`ExtensionPatcher`] fills in the proxy
//! facing values (scheme, port mapping, hostname) and expands variable
//! references in install tips.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::expand::expand_vars;
use crate::model::{ServiceConfig, lenient_string};
use crate::settings::DeploySettings;

const FALLBACK_WEBUI_PORT: u16 = 80;

/// Typed view of the vendor extension block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppExtension {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub scheme: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub port_map: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub hostname: Option<String>,

    /// Author-declared web UI port, validated by [`resolve_webui_port`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webui_port: Option<Value>,

    /// `tips.before_install` maps a language code to instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Value>,

    #[serde(flatten)]
    pub rest: Mapping,
}

impl AppExtension {
    /// Validate a raw block. Anything other than a mapping is rejected.
    pub fn from_value(app: &str, value: &Value) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidExtension {
            app: app.to_owned(),
            reason,
        };
        if !value.is_mapping() {
            return Err(invalid(format!("expected a mapping, found {value:?}")));
        }
        serde_yaml::from_value(value.clone()).map_err(|e| invalid(e.to_string()))
    }

    pub fn into_value(self) -> Result<Value> {
        serde_yaml::to_value(self).map_err(|e| Error::Serialize(e.to_string()))
    }

    /// Write this view back over the `original` block.
    ///
    /// Keys already present in `original` keep their position; keys the
    /// patcher added are appended.
    pub fn merge_into(self, original: &Value) -> Result<Value> {
        let Value::Mapping(mut merged) = original.clone() else {
            return self.into_value();
        };
        if let Value::Mapping(patched) = self.into_value()? {
            for (key, value) in patched {
                merged.insert(key, value);
            }
        }
        Ok(Value::Mapping(merged))
    }
}

/// The web UI port chosen for an app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebUiPort {
    pub port: u16,
    /// `true` unless the port came from an explicit `webui_port`.
    pub dynamic: bool,
}

/// Pick the web UI port: a valid explicit `webui_port`, else the first
/// service's first port target, else 80.
pub fn resolve_webui_port(
    webui_port: Option<&Value>,
    services: &[ServiceConfig],
    app: &str,
) -> WebUiPort {
    if let Some(value) = webui_port.filter(|v| !v.is_null()) {
        match explicit_port(value) {
            Some(port) => return WebUiPort { port, dynamic: false },
            None => tracing::warn!(app = %app, webui_port = ?value, "Ignoring invalid webui_port"),
        }
    }

    let declared = services.first().and_then(|s| s.ports.first()).map(|p| p.target);
    let port = match declared {
        Some(target) => match u16::try_from(target) {
            Ok(port) if port > 0 => port,
            _ => {
                tracing::warn!(app = %app, port = target, "Invalid port on first service, using default");
                FALLBACK_WEBUI_PORT
            }
        },
        None => {
            tracing::debug!(app = %app, "No ports on first service, using default");
            FALLBACK_WEBUI_PORT
        }
    };

    WebUiPort {
        port,
        dynamic: true,
    }
}

fn explicit_port(value: &Value) -> Option<u16> {
    let port = match value {
        Value::Number(n) => match n.as_u64() {
            Some(port) => port,
            None => {
                let float = n.as_f64()?;
                if float.fract() != 0.0 || float < 0.0 {
                    return None;
                }
                float as u64
            }
        },
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    u16::try_from(port).ok().filter(|p| *p > 0)
}

/// Fills in the proxy facing values of an extension block.
pub struct ExtensionPatcher<'s> {
    settings: &'s DeploySettings,
}

impl<'s> ExtensionPatcher<'s> {
    pub fn new(settings: &'s DeploySettings) -> Self {
        Self { settings }
    }

    /// Patch `ext` in place and return the resolved web UI port.
    ///
    /// Values the author already provided are left alone.
    pub fn patch(&self, app: &str, ext: &mut AppExtension, services: &[ServiceConfig]) -> WebUiPort {
        let webui = resolve_webui_port(ext.webui_port.as_ref(), services, app);
        tracing::info!(app = %app, port = webui.port, dynamic = webui.dynamic, "Resolved web UI port");

        if is_blank(&ext.scheme) {
            ext.scheme = Some(self.settings.scheme().to_owned());
        }
        if is_blank(&ext.port_map) {
            ext.port_map = Some(self.settings.proxy_port().to_owned());
        }

        match self.settings.valid_domain() {
            Some(domain) if is_blank(&ext.hostname) => {
                ext.hostname = Some(self.hostname(app, webui.port, domain));
            }
            Some(_) => {
                tracing::debug!(app = %app, "Keeping author-provided hostname");
            }
            None => {
                if let Some(domain) = self.settings.domain() {
                    tracing::warn!(app = %app, domain = %domain, "Invalid domain, not generating a hostname");
                }
            }
        }

        if let Some(tips) = ext.tips.as_mut() {
            self.expand_tips(app, tips);
        }

        webui
    }

    /// `{app}{sep}{domain}` on the default port, `{port}{sep}{app}{sep}{domain}`
    /// otherwise.
    pub fn hostname(&self, app: &str, port: u16, domain: &str) -> String {
        let sep = self.settings.separator();
        if port.to_string() == self.settings.default_port() {
            format!("{app}{sep}{domain}")
        } else {
            format!("{port}{sep}{app}{sep}{domain}")
        }
    }

    fn expand_tips(&self, app: &str, tips: &mut Value) {
        let Value::Mapping(tips) = tips else {
            tracing::warn!(app = %app, "tips is not a mapping, skipping expansion");
            return;
        };
        let Some(before_install) = tips.get_mut("before_install") else {
            return;
        };
        let Value::Mapping(entries) = before_install else {
            tracing::warn!(app = %app, "tips.before_install is not a mapping, skipping expansion");
            return;
        };
        for text in entries.values_mut() {
            if let Value::String(text) = text {
                *text = expand_vars(text, |name| self.settings.var(name));
            }
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}
