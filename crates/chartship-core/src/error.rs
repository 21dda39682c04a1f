//! Error types for core resource operations

use thiserror::Error;

/// Core operation errors
#[derive(Debug, Error)]
pub enum CoreError {
    // ============ Version Errors ============
    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("Invalid version range '{range}': {reason}")]
    InvalidRange { range: String, reason: String },

    #[error("Version {version} does not satisfy the configured range {range}")]
    RangeViolation { version: String, range: String },

    #[error("Version file not readable: {path}")]
    VersionFileUnreadable { path: String },

    #[error("No version line found in inspect output")]
    VersionNotReported,

    // ============ Chart Errors ============
    #[error("Chart metadata error: {message}")]
    ChartMetadata { message: String },

    #[error("Chart definition not found at {path}")]
    ChartDefinitionNotFound { path: String },

    // ============ IO Errors ============
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl From<serde_yaml::Error> for CoreError {
    fn from(e: serde_yaml::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}
