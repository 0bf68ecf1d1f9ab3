//! Manifest adaptation.
//!
//! [`ManifestAdapter`] rewrites a manifest for the deployment environment
//! described by a [`DeploySettings`] snapshot. Adaptation is all-or-nothing:
//! if any step fails the caller gets the original manifest back.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::expand::Placeholders;
use crate::extension::{AppExtension, ExtensionPatcher};
use crate::model::{ComposeApp, EXTENSION_KEY, NetworkConfig, ServiceConfig, ServiceNetwork};
use crate::ownership;
use crate::settings::DeploySettings;

/// Reserved prefix of bind mount sources that live on the shared storage root.
pub const DATA_PREFIX: &str = "/DATA";

/// Rewrites manifests for one settings snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ManifestAdapter<'s> {
    settings: &'s DeploySettings,
}

impl<'s> ManifestAdapter<'s> {
    pub fn new(settings: &'s DeploySettings) -> Self {
        Self { settings }
    }

    /// Adapt `app`.
    ///
    /// Returns the input borrowed when no trigger setting is present or when
    /// adaptation fails, and an owned rewritten copy otherwise. The input is
    /// never modified.
    pub fn adapt<'m>(&self, app: &'m ComposeApp) -> Cow<'m, ComposeApp> {
        if !self.settings.needs_adaptation() {
            tracing::debug!(app = %app.name, "No deployment settings, manifest unchanged");
            return Cow::Borrowed(app);
        }

        match self.try_adapt(app) {
            Ok(adapted) => Cow::Owned(adapted),
            Err(e) => {
                tracing::error!(app = %app.name, error = %e, "Adaptation aborted, keeping original manifest");
                Cow::Borrowed(app)
            }
        }
    }

    /// Adapt `app`, reporting why adaptation was impossible.
    ///
    /// Unlike [`adapt`](Self::adapt) this always rewrites, even when no
    /// trigger setting is present.
    pub fn try_adapt(&self, app: &ComposeApp) -> Result<ComposeApp> {
        let settings = self.settings;
        tracing::info!(
            app = %app.name,
            data_root = ?settings.data_root(),
            network = ?settings.network(),
            domain = ?settings.domain(),
            scheme = %settings.scheme(),
            ownership = settings.ownership_requested(),
            "Adapting manifest"
        );

        let mut adapted = app.clone();

        let mut dynamic_port = false;
        if let Some(raw) = app.extension() {
            let mut ext = AppExtension::from_value(&app.name, raw)?;
            if app.services.is_empty() {
                return Err(Error::NoServices {
                    app: app.name.clone(),
                });
            }
            let webui = ExtensionPatcher::new(settings).patch(&app.name, &mut ext, &app.services);
            dynamic_port = webui.dynamic;
            adapted
                .extensions
                .insert(EXTENSION_KEY.to_owned(), ext.merge_into(raw)?);
        }

        let rewrite_services = settings.data_root().is_some()
            || settings.network().is_some()
            || settings.ownership_requested();
        if rewrite_services {
            if adapted.services.is_empty() {
                return Err(Error::NoServices {
                    app: app.name.clone(),
                });
            }
            if let Some(network) = settings.network() {
                adapted.networks = BTreeMap::from([(
                    network.to_owned(),
                    Some(NetworkConfig::external(network)),
                )]);
            }
            for service in &mut adapted.services {
                self.adapt_service(&app.name, service, dynamic_port);
            }
        }

        let placeholders = Placeholders::from_settings(settings);
        for service in &mut adapted.services {
            placeholders.apply_to_service(service);
        }

        Ok(adapted)
    }

    fn adapt_service(&self, app: &str, service: &mut ServiceConfig, dynamic_port: bool) {
        let settings = self.settings;

        if let Some(data_root) = settings.data_root() {
            for volume in &mut service.volumes {
                if let Some(source) = rewrite_source(&volume.source, data_root) {
                    tracing::debug!(app = %app, service = %service.name, from = %volume.source, to = %source, "Rewriting volume");
                    volume.source = source;
                }
            }
        }

        if dynamic_port && !service.ports.is_empty() {
            for port in std::mem::take(&mut service.ports) {
                if port.target == 0 || port.target > u32::from(u16::MAX) {
                    tracing::warn!(app = %app, service = %service.name, port = port.target, "Skipping invalid port");
                    continue;
                }
                let target = port.target.to_string();
                if !service.expose.contains(&target) {
                    service.expose.push(target);
                }
            }
            tracing::debug!(app = %app, service = %service.name, expose = ?service.expose, "Converted published ports to expose");
        }

        if let Some(network) = settings.network() {
            if service.uses_default_network_mode() {
                service.network_mode = None;
                service.networks =
                    BTreeMap::from([(network.to_owned(), Some(ServiceNetwork::default()))]);
                if service.hostname.as_deref().is_none_or(str::is_empty) {
                    service.hostname = Some(app.to_owned());
                }
            } else {
                tracing::debug!(
                    app = %app,
                    service = %service.name,
                    network_mode = ?service.network_mode,
                    "Custom network mode, not attaching network"
                );
            }
        }

        if settings.ownership_requested() {
            ownership::apply(service, settings.puid(), settings.pgid());
        }
    }
}

/// Adapt `app` under `settings`. See [`ManifestAdapter::adapt`].
pub fn adapt<'m>(app: &'m ComposeApp, settings: &DeploySettings) -> Cow<'m, ComposeApp> {
    ManifestAdapter::new(settings).adapt(app)
}

/// Replace the `/DATA` prefix of `source` with `data_root`.
///
/// The prefix only matches a whole path component, so `/DATABASE` is left
/// alone. Returns `None` when nothing matches.
pub fn rewrite_source(source: &str, data_root: &str) -> Option<String> {
    let rest = source.strip_prefix(DATA_PREFIX)?;
    if !(rest.is_empty() || rest.starts_with('/')) {
        return None;
    }
    let root = data_root.trim_end_matches('/');
    Some(match (root.is_empty(), rest.is_empty()) {
        (true, true) => "/".to_owned(),
        _ => format!("{root}{rest}"),
    })
}
