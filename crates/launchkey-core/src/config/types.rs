//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use launchkey_signing::SigningPolicy;

use crate::dependency::Dependency;
use crate::environment::BuildEnvironment;

/// Main configuration for launchkey
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Declared external dependencies
    pub dependencies: Vec<Dependency>,

    /// Application metadata
    pub project: ProjectConfig,

    /// SDK/NDK versions passed through to packaging
    pub environment: BuildEnvironment,

    /// Release signing configuration
    pub signing: SigningConfig,
}

/// Application packaging metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Kotlin/Java namespace of the generated sources
    pub namespace: String,

    /// Application ID; defaults to the namespace when empty
    pub application_id: String,

    /// Integer version code
    pub version_code: u32,

    /// User-visible version name
    pub version_name: String,

    /// JVM target for Java and Kotlin compilation
    pub jvm_target: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            namespace: "com.example.app".to_string(),
            application_id: String::new(),
            version_code: 1,
            version_name: "1.0.0".to_string(),
            jvm_target: "11".to_string(),
        }
    }
}

impl ProjectConfig {
    /// Application ID, falling back to the namespace
    pub fn effective_application_id(&self) -> &str {
        if self.application_id.is_empty() {
            &self.namespace
        } else {
            &self.application_id
        }
    }
}

/// Release signing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningConfig {
    /// Properties file holding the release identity, relative to the build root
    pub properties_file: PathBuf,

    /// Build root; relative paths are taken from the config file's directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_root: Option<PathBuf>,

    /// What to do when no complete release identity is available
    pub policy: SigningPolicy,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            properties_file: PathBuf::from(super::defaults::DEFAULT_PROPERTIES_FILE),
            build_root: None,
            policy: SigningPolicy::default(),
        }
    }
}

impl SigningConfig {
    /// Resolve the build root given the directory the config was found in
    pub fn resolve_build_root(&self, base_dir: &Path) -> PathBuf {
        match &self.build_root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => base_dir.join(root),
            None => base_dir.to_path_buf(),
        }
    }

    /// Location of the properties file under the build root
    pub fn properties_path(&self, build_root: &Path) -> PathBuf {
        if self.properties_file.is_absolute() {
            self.properties_file.clone()
        } else {
            build_root.join(&self.properties_file)
        }
    }
}
