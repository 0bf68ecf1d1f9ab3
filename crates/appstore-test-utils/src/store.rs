//! [`TestStore`] builder for on-disk app store layouts.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// File name of a manifest inside an app directory.
pub const COMPOSE_FILE: &str = "docker-compose.yml";

/// A temporary app store: `Apps/<id>/docker-compose.yml` per app.
///
/// # Example
///
/// ```rust
/// use appstore_test_utils::{TestStore, fixtures};
///
/// let store = TestStore::new().with_app("jellyfin", fixtures::JELLYFIN);
/// assert!(store.app_file("jellyfin").exists());
/// ```
pub struct TestStore {
    temp_dir: TempDir,
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TestStore {
    /// Create an empty store with an `Apps` directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("Apps")).unwrap();
        Self { temp_dir }
    }

    /// A store holding every fixture from [`crate::fixtures::ALL`].
    pub fn with_all_fixtures() -> Self {
        crate::fixtures::ALL
            .iter()
            .fold(Self::new(), |store, (id, yaml)| store.with_app(id, yaml))
    }

    /// Add an app manifest under `Apps/<id>`.
    pub fn with_app(self, id: &str, yaml: &str) -> Self {
        self.write_app(id, yaml);
        self
    }

    /// Write (or overwrite) an app manifest under `Apps/<id>`.
    pub fn write_app(&self, id: &str, yaml: &str) {
        let path = self.app_file(id);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, yaml).unwrap();
    }

    /// Root path of the store.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the manifest for `id`.
    pub fn app_file(&self, id: &str) -> PathBuf {
        self.root().join("Apps").join(id).join(COMPOSE_FILE)
    }
}
