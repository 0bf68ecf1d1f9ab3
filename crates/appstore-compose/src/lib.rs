//! Compose manifest model and deployment adaptation for the app store.
//!
//! This crate parses multi-service application manifests (compose documents
//! carrying an `x-casaos` vendor block) and rewrites them for the environment
//! they are about to run in: shared storage root, overlay network, reverse
//! proxy hostname and container ownership.
//!
//! Everything here is a pure transformation. Callers snapshot the process
//! environment once into [`DeploySettings`] and hand it to [`ManifestAdapter`].
//!
//! # Example
//!
//! ```
//! use appstore_compose::{ComposeApp, DeploySettings, ManifestAdapter};
//!
//! let app = ComposeApp::from_yaml(
//!     r#"
//! name: photos
//! services:
//!   photos:
//!     image: photoprism/photoprism:240915
//!     volumes:
//!       - /DATA/AppData/photos:/photoprism/storage
//! "#,
//! )
//! .unwrap();
//!
//! let settings = DeploySettings::from_pairs([("DATA_ROOT", "/mnt/pool")]);
//! let adapted = ManifestAdapter::new(&settings).adapt(&app);
//!
//! assert_eq!(
//!     adapted.services[0].volumes[0].source,
//!     "/mnt/pool/AppData/photos"
//! );
//! ```

pub mod adapter;
pub mod error;
pub mod expand;
pub mod extension;
pub mod image;
pub mod model;
pub mod ownership;
pub mod settings;

pub use adapter::{ManifestAdapter, adapt};
pub use error::{Error, Result};
pub use extension::{AppExtension, ExtensionPatcher, WebUiPort, resolve_webui_port};
pub use image::ImageRef;
pub use model::{
    Command, ComposeApp, EXTENSION_KEY, NetworkConfig, PortConfig, ServiceConfig, ServiceNetwork,
    VolumeMount,
};
pub use settings::DeploySettings;
