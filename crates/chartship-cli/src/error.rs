//! Resource error types with exit code handling
//!
//! Every stage of the pipeline fails with its own variant; the variant
//! decides the process exit code so callers can distinguish failure
//! classes without parsing stderr.

use miette::Diagnostic;
use thiserror::Error;

use chartship_core::CoreError;
use chartship_repo::RepoError;

use crate::exit_codes;

/// Resource error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Malformed request or invalid parameter combination
    #[error("Invalid input: {message}")]
    #[diagnostic(code(chartship::cli::input))]
    Input {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Candidate version fails the configured range constraint
    #[error("Version {version} does not satisfy the configured range {range}")]
    #[diagnostic(code(chartship::cli::version_range))]
    RangeViolation { version: String, range: String },

    /// Auxiliary repository registration failed
    #[error("Failed to register dependency repository '{name}': {message}")]
    #[diagnostic(code(chartship::cli::dependency_repo))]
    DependencyRepo { name: String, message: String },

    /// Packaging or archive inspection failed
    #[error("Packaging failed: {message}")]
    #[diagnostic(code(chartship::cli::package))]
    Package { message: String },

    /// Key import failed or produced no usable key identifier
    #[error("Signing failed: {message}")]
    #[diagnostic(code(chartship::cli::sign))]
    Sign { message: String },

    /// Network failure or unexpected HTTP status
    #[error("Transport error: {message}")]
    #[diagnostic(code(chartship::cli::transport))]
    Transport { message: String },

    /// The server took the upload but did not save it
    #[error("Upload rejected: {message}")]
    #[diagnostic(code(chartship::cli::rejected))]
    Rejected { message: String },

    /// Post-upload round trip failed or versions disagree
    #[error("Publish verification failed: {message}")]
    #[diagnostic(code(chartship::cli::verify))]
    Verify { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(chartship::cli::io))]
    Io { message: String },

    /// Wrapped error for passthrough (stores the formatted message)
    #[error("{message}")]
    #[diagnostic(code(chartship::cli::error))]
    Other { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Input { .. } => exit_codes::INPUT_ERROR,
            CliError::RangeViolation { .. } => exit_codes::RANGE_ERROR,
            CliError::DependencyRepo { .. } => exit_codes::DEPENDENCY_ERROR,
            CliError::Package { .. } => exit_codes::PACKAGE_ERROR,
            CliError::Sign { .. } => exit_codes::SIGN_ERROR,
            CliError::Transport { .. } => exit_codes::TRANSPORT_ERROR,
            CliError::Rejected { .. } => exit_codes::REJECTED_ERROR,
            CliError::Verify { .. } => exit_codes::VERIFY_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }

    /// Create an input error
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            help: None,
        }
    }

    /// Create an input error with help text
    pub fn input_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a packaging error
    pub fn package(message: impl Into<String>) -> Self {
        Self::Package {
            message: message.into(),
        }
    }

    /// Create a signing error
    pub fn sign(message: impl Into<String>) -> Self {
        Self::Sign {
            message: message.into(),
        }
    }

    /// Create a verification error
    pub fn verify(message: impl Into<String>) -> Self {
        Self::Verify {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::RangeViolation { version, range } => {
                CliError::RangeViolation { version, range }
            }
            CoreError::VersionNotReported => CliError::Package {
                message: err.to_string(),
            },
            CoreError::Io(e) => CliError::Io {
                message: e.to_string(),
            },
            other => CliError::input(other.to_string()),
        }
    }
}

impl From<RepoError> for CliError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Http { status, body } => CliError::Transport {
                message: format!("HTTP {}: {}", status, body.trim()),
            },
            RepoError::Network { message } | RepoError::InvalidResponse { message } => {
                CliError::Transport { message }
            }
            RepoError::UploadRejected { message } => CliError::Rejected { message },
            RepoError::NotSaved => CliError::Rejected {
                message: err.to_string(),
            },
            RepoError::IntegrityCheckFailed { .. } => CliError::Verify {
                message: err.to_string(),
            },
            RepoError::InvalidConfig { message } => CliError::input(message),
            RepoError::InvalidUrl { .. } => CliError::input(err.to_string()),
            RepoError::Io(e) => CliError::Io {
                message: e.to_string(),
            },
            RepoError::Serialization(message) => CliError::Transport { message },
        }
    }
}

/// Result type for resource operations
pub type Result<T> = std::result::Result<T, CliError>;
