//! Shared test utilities for the appstore workspace.
//!
//! This crate provides canonical manifests and on-disk store layouts so the
//! crate test suites exercise the same data. It is a dev-dependency only and
//! never published.
//!
//! # Modules
//!
//! - [`fixtures`]: manifest YAML covering each author class, architecture
//!   constraint and network mode
//! - [`store`]: [`TestStore`] builder for `Apps/<id>/docker-compose.yml` trees

pub mod fixtures;
pub mod store;

pub use store::TestStore;
