//! Signing identity types

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::secret::Secret;

/// Key alias of the Android SDK debug keystore
pub const DEBUG_KEY_ALIAS: &str = "androiddebugkey";

/// A complete release signing identity read from `key.properties`.
///
/// Every field holds the value from the properties file verbatim. The
/// keystore path is only resolved against the build root on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningIdentity {
    /// Keystore path as written in the properties file
    pub store_file: String,

    /// Keystore password
    pub store_password: Secret,

    /// Key alias within the keystore
    pub key_alias: String,

    /// Key password
    pub key_password: Secret,
}

impl SigningIdentity {
    /// Create a new release signing identity
    pub fn new(
        store_file: impl Into<String>,
        store_password: impl Into<Secret>,
        key_alias: impl Into<String>,
        key_password: impl Into<Secret>,
    ) -> Self {
        Self {
            store_file: store_file.into(),
            store_password: store_password.into(),
            key_alias: key_alias.into(),
            key_password: key_password.into(),
        }
    }

    /// Resolve the keystore path against the build root.
    /// Absolute paths are returned unchanged.
    pub fn resolve_store_file(&self, build_root: &Path) -> PathBuf {
        let store_file = Path::new(&self.store_file);
        if store_file.is_absolute() {
            store_file.to_path_buf()
        } else {
            build_root.join(store_file)
        }
    }

    /// SHA-256 of the keystore file, or `None` if it does not exist
    pub fn keystore_sha256(&self, build_root: &Path) -> Result<Option<String>> {
        use sha2::Digest;

        let path = self.resolve_store_file(build_root);
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read(&path)?;
        Ok(Some(format!("{:x}", sha2::Sha256::digest(&content))))
    }
}

impl std::fmt::Display for SigningIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.key_alias, self.store_file)
    }
}

/// Which identity the release build is signed with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "identity")]
pub enum SigningDecision {
    /// Sign with the release identity from `key.properties`
    #[serde(rename = "release")]
    ReleaseIdentity(SigningIdentity),

    /// Fall back to the Android SDK debug keystore
    #[serde(rename = "debug")]
    DebugIdentity,
}

impl SigningDecision {
    /// Name of the signing config this decision selects
    pub fn config_name(&self) -> &'static str {
        match self {
            Self::ReleaseIdentity(_) => "release",
            Self::DebugIdentity => "debug",
        }
    }

    pub fn is_release(&self) -> bool {
        matches!(self, Self::ReleaseIdentity(_))
    }

    /// The release identity, if one was selected
    pub fn identity(&self) -> Option<&SigningIdentity> {
        match self {
            Self::ReleaseIdentity(identity) => Some(identity),
            Self::DebugIdentity => None,
        }
    }
}

impl std::fmt::Display for SigningDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReleaseIdentity(identity) => write!(f, "release signing with {}", identity),
            Self::DebugIdentity => write!(f, "debug signing ({})", DEBUG_KEY_ALIAS),
        }
    }
}

/// Location of the Android SDK debug keystore, `~/.android/debug.keystore`
pub fn debug_keystore_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".android").join("debug.keystore"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn identity(store_file: &str) -> SigningIdentity {
        SigningIdentity::new(store_file, "pw1", "key1", "pw2")
    }

    #[test]
    fn test_resolve_relative_store_file() {
        let id = identity("release.jks");
        assert_eq!(
            id.resolve_store_file(Path::new("/project/android")),
            PathBuf::from("/project/android/release.jks")
        );
    }

    #[test]
    fn test_resolve_absolute_store_file() {
        let id = identity("/keys/release.jks");
        assert_eq!(
            id.resolve_store_file(Path::new("/project/android")),
            PathBuf::from("/keys/release.jks")
        );
    }

    #[test]
    fn test_keystore_sha256() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("release.jks"), b"abc").unwrap();

        let id = identity("release.jks");
        assert_eq!(
            id.keystore_sha256(temp.path()).unwrap().as_deref(),
            Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
        assert!(identity("missing.jks").keystore_sha256(temp.path()).unwrap().is_none());
    }

    #[test]
    fn test_decision_serializes_without_secrets() {
        let decision = SigningDecision::ReleaseIdentity(identity("release.jks"));
        let json = serde_json::to_value(&decision).unwrap();

        assert_eq!(json["identity"], "release");
        assert_eq!(json["storeFile"], "release.jks");
        assert_eq!(json["keyAlias"], "key1");
        assert_eq!(json["storePassword"], "***");
        assert_eq!(json["keyPassword"], "***");

        let json = serde_json::to_value(SigningDecision::DebugIdentity).unwrap();
        assert_eq!(json["identity"], "debug");
    }

    #[test]
    fn test_decision_accessors() {
        let release = SigningDecision::ReleaseIdentity(identity("release.jks"));
        assert!(release.is_release());
        assert_eq!(release.config_name(), "release");
        assert_eq!(release.identity().map(|i| i.key_alias.as_str()), Some("key1"));

        let debug = SigningDecision::DebugIdentity;
        assert!(!debug.is_release());
        assert_eq!(debug.config_name(), "debug");
        assert!(debug.identity().is_none());
        assert_eq!(debug.to_string(), "debug signing (androiddebugkey)");
    }
}
