//! Error types for appstore-compose

/// Result type for appstore-compose operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or adapting a manifest
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document is not a valid compose manifest.
    #[error("failed to parse compose manifest: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The manifest could not be serialized back to YAML.
    #[error("failed to serialize compose manifest: {0}")]
    Serialize(String),

    /// The vendor extension block is present but has the wrong shape.
    #[error("invalid x-casaos extension in '{app}': {reason}")]
    InvalidExtension { app: String, reason: String },

    /// An operation needed at least one service and the manifest has none.
    #[error("no services defined in '{app}'")]
    NoServices { app: String },

    /// A named service does not exist in the manifest.
    #[error("service '{service}' not found in '{app}'")]
    ServiceNotFound { app: String, service: String },

    /// A port declaration could not be understood.
    #[error("invalid port declaration '{spec}'")]
    InvalidPort { spec: String },

    /// A volume declaration could not be understood.
    #[error("invalid volume declaration '{spec}'")]
    InvalidVolume { spec: String },
}
