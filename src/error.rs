use thiserror::Error;

/// Unified error type for release-bump operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Invalid semantic version: {0}")]
    InvalidSemVer(String),

    #[error("Unknown change type - use one of: {triggers}")]
    UnknownChangeType { triggers: String },

    #[error("Unsupported change type: increment requires major, minor or patch")]
    UnsupportedChangeType,

    #[error("Malformed changelog: {0}")]
    MalformedDocument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml_edit::TomlError),
}

/// Convenience type alias for Results in release-bump
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create an invalid version error for the offending text
    pub fn invalid_semver(version: impl Into<String>) -> Self {
        ReleaseError::InvalidSemVer(version.into())
    }

    /// Create an unknown change type error listing the accepted triggers
    pub fn unknown_change_type<I, S>(triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let triggers = triggers
            .into_iter()
            .map(|t| t.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        ReleaseError::UnknownChangeType { triggers }
    }

    /// Create a malformed changelog error with context
    pub fn malformed(msg: impl Into<String>) -> Self {
        ReleaseError::MalformedDocument(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseError::Manifest(msg.into())
    }
}
