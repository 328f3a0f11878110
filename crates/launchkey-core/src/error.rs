//! Error types for launchkey

use thiserror::Error;

use launchkey_signing::SigningError;

/// Result type alias using LaunchkeyError
pub type Result<T> = std::result::Result<T, LaunchkeyError>;

/// Main error type for launchkey operations
#[derive(Debug, Error)]
pub enum LaunchkeyError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Signing resolution errors
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// Dependency declaration errors
    #[error(transparent)]
    Dependency(#[from] DependencyError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Dependency declaration errors
#[derive(Debug, Error)]
pub enum DependencyError {
    /// Not a `group:artifact:version` coordinate
    #[error("Invalid dependency coordinate '{0}', expected group:artifact:version")]
    InvalidCoordinate(String),

    /// Version selector that Gradle would not accept
    #[error("Invalid version selector '{selector}' in {coordinate}")]
    InvalidSelector {
        coordinate: String,
        selector: String,
    },
}
