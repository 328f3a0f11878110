//! Error types for signing resolution

use std::path::PathBuf;
use thiserror::Error;

use crate::resolver::FallbackReason;

/// Result type alias for signing operations
pub type Result<T> = std::result::Result<T, SigningError>;

/// Signing-related errors
#[derive(Debug, Error)]
pub enum SigningError {
    /// A required field is declared but cannot be used
    #[error("Signing configuration error: {field} - {reason}")]
    Configuration { field: String, reason: String },

    /// Policy demanded a release identity but the properties fell short
    #[error("Release signing identity required, but {reason}")]
    ReleaseIdentityRequired { reason: FallbackReason },

    /// Malformed `\uXXXX` escape in a properties file
    #[error("Malformed \\uXXXX escape in properties at line {line}")]
    MalformedEscape { line: usize },

    /// Properties file exists but could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SigningError {
    /// Build a configuration error for the given properties field
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
