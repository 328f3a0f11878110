//! Configuration validation

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Java package name: dot-separated identifiers, at least two segments
static PACKAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$").expect("Invalid regex")
});

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_project(config)?;
    validate_signing(config)?;
    validate_dependencies(config);
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.into(),
    }
}

fn validate_project(config: &Config) -> Result<()> {
    let package = &*PACKAGE_REGEX;
    let project = &config.project;

    if !package.is_match(&project.namespace) {
        return Err(invalid(
            "project.namespace",
            format!("'{}' is not a valid package name", project.namespace),
        )
        .into());
    }

    if !project.application_id.is_empty() && !package.is_match(&project.application_id) {
        return Err(invalid(
            "project.application_id",
            format!("'{}' is not a valid application ID", project.application_id),
        )
        .into());
    }

    if project.version_code == 0 {
        return Err(invalid("project.version_code", "must be a positive integer").into());
    }

    if project.version_name.trim().is_empty() {
        return Err(invalid("project.version_name", "version name cannot be empty").into());
    }

    if project.jvm_target.trim().is_empty() {
        return Err(invalid("project.jvm_target", "JVM target cannot be empty").into());
    }

    Ok(())
}

fn validate_signing(config: &Config) -> Result<()> {
    if config.signing.properties_file.as_os_str().is_empty() {
        return Err(invalid("signing.properties_file", "properties file cannot be empty").into());
    }

    Ok(())
}

fn validate_dependencies(config: &Config) {
    if !config.dependencies.is_empty() {
        debug!(count = config.dependencies.len(), "validating dependencies");
    }
    for dependency in config.dependencies.iter().filter(|d| d.version.is_dynamic()) {
        warn!(
            dependency = %dependency,
            "dynamic version selector, resolved version may change between builds"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_invalid_namespace() {
        for bad in ["", "app", "com.example.", "com.1example.app", "com example.app"] {
            let mut config = Config::default();
            config.project.namespace = bad.to_string();
            assert!(validate_config(&config).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_validate_application_id() {
        let mut config = Config::default();
        config.project.application_id = "com.example.app_free".to_string();
        assert!(validate_config(&config).is_ok());

        config.project.application_id = "not valid".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_version_fields() {
        let mut config = Config::default();
        config.project.version_code = 0;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.project.version_name = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_properties_file() {
        let mut config = Config::default();
        config.signing.properties_file = std::path::PathBuf::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_dynamic_dependencies_are_allowed() {
        let mut config = Config::default();
        config.dependencies = vec!["com.google.android.gms:play-services-games-v2:+"
            .parse()
            .unwrap()];
        assert!(validate_config(&config).is_ok());
    }
}
