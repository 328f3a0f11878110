//! Exit codes for the CLI

use launchkey_core::{ConfigError, LaunchkeyError};
use launchkey_signing::SigningError;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Release signing error
pub const SIGNING_ERROR: i32 = 6;

/// Map an error to the exit code reported to the calling build
pub fn for_error(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(err) = cause.downcast_ref::<LaunchkeyError>() {
            return match err {
                LaunchkeyError::Config(_) | LaunchkeyError::Dependency(_) => CONFIG_ERROR,
                LaunchkeyError::Signing(_) => SIGNING_ERROR,
                LaunchkeyError::Io(_) => ERROR,
            };
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return CONFIG_ERROR;
        }
        if cause.downcast_ref::<SigningError>().is_some() {
            return SIGNING_ERROR;
        }
    }
    ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchkey_signing::FallbackReason;

    #[test]
    fn test_signing_errors_map_to_signing_code() {
        let err = anyhow::Error::from(LaunchkeyError::Signing(
            SigningError::ReleaseIdentityRequired {
                reason: FallbackReason::Missing,
            },
        ));
        assert_eq!(for_error(&err), SIGNING_ERROR);

        let err = anyhow::Error::from(SigningError::configuration("storeFile", "not found"));
        assert_eq!(for_error(&err), SIGNING_ERROR);
    }

    #[test]
    fn test_config_errors_map_to_config_code() {
        let err = anyhow::Error::from(LaunchkeyError::Config(ConfigError::InvalidValue {
            field: "project.version_code".to_string(),
            message: "must be a positive integer".to_string(),
        }));
        assert_eq!(for_error(&err), CONFIG_ERROR);
    }

    #[test]
    fn test_context_is_looked_through() {
        let err = anyhow::Error::from(SigningError::configuration("keyAlias", "empty"))
            .context("resolving release signing");
        assert_eq!(for_error(&err), SIGNING_ERROR);
    }

    #[test]
    fn test_other_errors_are_general() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(for_error(&err), ERROR);
    }
}
