//! Error types for appstore-catalog

/// Result type for appstore-catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving a single catalog entry
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying manifest is malformed.
    #[error(transparent)]
    Compose(#[from] appstore_compose::Error),

    /// The manifest carries no `x-casaos` block.
    #[error("no store information in '{app}'")]
    MissingStoreInfo { app: String },

    /// `main` names a service the manifest does not define.
    #[error("main service '{service}' not found in '{app}'")]
    MainServiceNotFound { app: String, service: String },
}
