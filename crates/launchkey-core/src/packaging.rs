//! Release packaging configuration
//!
//! Combines project metadata, the injected build environment, declared
//! dependencies and the signing decision into the configuration the
//! packaging stage consumes.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use launchkey_signing::{
    resolve_with_policy, FallbackReason, SigningDecision, SigningPolicy, SigningProperties,
};

use crate::config::{Config, ProjectConfig};
use crate::dependency::Dependency;
use crate::environment::BuildEnvironment;
use crate::error::Result;

/// Everything the packaging stage needs for a release build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagingConfig {
    pub namespace: String,
    pub application_id: String,
    pub version_code: u32,
    pub version_name: String,
    pub jvm_target: String,
    pub environment: BuildEnvironment,
    pub dependencies: Vec<Dependency>,

    /// Signing identity for the release build type
    pub signing: SigningDecision,

    /// Keystore path resolved against the build root (release only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keystore: Option<PathBuf>,
}

impl PackagingConfig {
    /// Assemble the packaging configuration around a signing decision
    pub fn assemble(
        project: &ProjectConfig,
        environment: BuildEnvironment,
        dependencies: Vec<Dependency>,
        signing: SigningDecision,
        build_root: &Path,
    ) -> Self {
        let keystore = signing
            .identity()
            .map(|identity| identity.resolve_store_file(build_root));

        Self {
            namespace: project.namespace.clone(),
            application_id: project.effective_application_id().to_string(),
            version_code: project.version_code,
            version_name: project.version_name.clone(),
            jvm_target: project.jvm_target.clone(),
            environment,
            dependencies,
            signing,
            keystore,
        }
    }
}

/// Result of preparing a release build
#[derive(Debug, Clone, Serialize)]
pub struct ReleasePlan {
    pub packaging: PackagingConfig,

    /// Why release signing was not used, if it was not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackReason>,

    /// Properties file that was consulted
    pub properties_path: PathBuf,

    pub build_root: PathBuf,
}

/// Read the signing properties once and assemble the packaging configuration.
///
/// `environment` overrides the configured build environment field by field.
/// `properties_path` replaces the configured properties file location.
pub fn prepare_release(
    config: &Config,
    build_root: &Path,
    environment: BuildEnvironment,
    policy: SigningPolicy,
    properties_path: Option<&Path>,
) -> Result<ReleasePlan> {
    let properties_path = properties_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.signing.properties_path(build_root));
    debug!(
        path = %properties_path.display(),
        %policy,
        "resolving release signing"
    );

    let resolution = {
        let properties = SigningProperties::load(&properties_path)?;
        resolve_with_policy(&properties, policy)?
    };

    let packaging = PackagingConfig::assemble(
        &config.project,
        config.environment.clone().merge(environment),
        config.dependencies.clone(),
        resolution.decision,
        build_root,
    );
    info!(
        application_id = %packaging.application_id,
        signing = packaging.signing.config_name(),
        "assembled packaging configuration"
    );

    Ok(ReleasePlan {
        packaging,
        fallback: resolution.fallback,
        properties_path,
        build_root: build_root.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LaunchkeyError;
    use launchkey_signing::{SigningError, SigningIdentity};
    use tempfile::TempDir;

    const COMPLETE: &str =
        "storeFile=release.jks\nstorePassword=pw1\nkeyAlias=key1\nkeyPassword=pw2\n";

    fn config() -> Config {
        let mut config = Config::default();
        config.project.namespace = "com.bilalcavus.woodenblock".to_string();
        config.project.version_code = 19;
        config.project.version_name = "1.0.7".to_string();
        config.environment.compile_sdk = Some("35".to_string());
        config.dependencies = vec!["com.google.android.gms:play-services-games-v2:+"
            .parse()
            .unwrap()];
        config
    }

    #[test]
    fn test_prepare_release_with_complete_properties() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("key.properties"), COMPLETE).unwrap();

        let plan = prepare_release(
            &config(),
            temp.path(),
            BuildEnvironment::default(),
            SigningPolicy::AllowDebugFallback,
            None,
        )
        .unwrap();

        assert!(plan.fallback.is_none());
        assert_eq!(
            plan.packaging.signing,
            SigningDecision::ReleaseIdentity(SigningIdentity::new(
                "release.jks",
                "pw1",
                "key1",
                "pw2"
            ))
        );
        assert_eq!(plan.packaging.keystore, Some(temp.path().join("release.jks")));
        assert_eq!(plan.packaging.application_id, "com.bilalcavus.woodenblock");
        assert_eq!(plan.packaging.version_code, 19);
        assert_eq!(plan.properties_path, temp.path().join("key.properties"));
    }

    #[test]
    fn test_prepare_release_without_properties_falls_back() {
        let temp = TempDir::new().unwrap();

        let plan = prepare_release(
            &config(),
            temp.path(),
            BuildEnvironment::default(),
            SigningPolicy::AllowDebugFallback,
            None,
        )
        .unwrap();

        assert_eq!(plan.packaging.signing, SigningDecision::DebugIdentity);
        assert_eq!(plan.fallback, Some(FallbackReason::Missing));
        assert!(plan.packaging.keystore.is_none());
    }

    #[test]
    fn test_prepare_release_strict_policy_fails() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("key.properties"), "storeFile=release.jks\n").unwrap();

        let err = prepare_release(
            &config(),
            temp.path(),
            BuildEnvironment::default(),
            SigningPolicy::RequireRelease,
            None,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            LaunchkeyError::Signing(SigningError::ReleaseIdentityRequired { .. })
        ));
    }

    #[test]
    fn test_prepare_release_properties_override_and_environment() {
        let temp = TempDir::new().unwrap();
        let custom = temp.path().join("ci").join("upload.properties");
        std::fs::create_dir_all(custom.parent().unwrap()).unwrap();
        std::fs::write(&custom, COMPLETE).unwrap();

        let overrides = BuildEnvironment {
            min_sdk: Some("21".to_string()),
            ..Default::default()
        };
        let plan = prepare_release(
            &config(),
            temp.path(),
            overrides,
            SigningPolicy::RequireRelease,
            Some(&custom),
        )
        .unwrap();

        assert!(plan.packaging.signing.is_release());
        assert_eq!(plan.packaging.environment.compile_sdk.as_deref(), Some("35"));
        assert_eq!(plan.packaging.environment.min_sdk.as_deref(), Some("21"));
    }

    #[test]
    fn test_packaging_json_has_no_passwords() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("key.properties"), COMPLETE).unwrap();

        let plan = prepare_release(
            &config(),
            temp.path(),
            BuildEnvironment::default(),
            SigningPolicy::AllowDebugFallback,
            None,
        )
        .unwrap();

        let json = serde_json::to_string(&plan).unwrap();
        assert!(!json.contains("pw1"));
        assert!(!json.contains("pw2"));
        assert!(json.contains("play-services-games-v2:+"));
    }
}
