//! Release signing resolution
//!
//! Decides between the release identity described by `key.properties` and
//! the debug keystore fallback. An empty or incomplete properties mapping
//! falls back to debug signing with a warning. A required key with an
//! empty value counts as missing; any other value is taken verbatim.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, SigningError};
use crate::identity::{SigningDecision, SigningIdentity};
use crate::properties::SigningProperties;
use crate::secret::Secret;

pub const STORE_FILE: &str = "storeFile";
pub const STORE_PASSWORD: &str = "storePassword";
pub const KEY_ALIAS: &str = "keyAlias";
pub const KEY_PASSWORD: &str = "keyPassword";

/// Keys a release identity needs, in reporting order
pub const REQUIRED_KEYS: [&str; 4] = [STORE_FILE, STORE_PASSWORD, KEY_ALIAS, KEY_PASSWORD];

/// Why resolution fell back to the debug identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No signing properties were found
    Missing,
    /// Some required keys are absent or empty
    Incomplete { missing: Vec<String> },
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "signing properties are missing"),
            Self::Incomplete { missing } => write!(
                f,
                "signing properties are incomplete (missing {})",
                missing.join(", ")
            ),
        }
    }
}

/// What to do when no release identity is available
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SigningPolicy {
    /// Warn and sign with the debug keystore
    #[default]
    AllowDebugFallback,
    /// Refuse to fall back
    RequireRelease,
}

impl FromStr for SigningPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "allow_debug_fallback" | "fallback" => Ok(Self::AllowDebugFallback),
            "require_release" | "strict" => Ok(Self::RequireRelease),
            _ => Err(format!(
                "Unknown signing policy: {}. Valid options: allow_debug_fallback, require_release",
                s
            )),
        }
    }
}

impl std::fmt::Display for SigningPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllowDebugFallback => write!(f, "allow_debug_fallback"),
            Self::RequireRelease => write!(f, "require_release"),
        }
    }
}

/// Outcome of resolution, including why it fell back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub decision: SigningDecision,
    pub fallback: Option<FallbackReason>,
}

impl Resolution {
    fn fallback(reason: FallbackReason) -> Self {
        Self {
            decision: SigningDecision::DebugIdentity,
            fallback: Some(reason),
        }
    }
}

/// Resolve the release signing identity, warning on fallback
pub fn resolve_signing_identity(properties: &SigningProperties) -> Result<SigningDecision> {
    resolve_with_policy(properties, SigningPolicy::AllowDebugFallback)
        .map(|resolution| resolution.decision)
}

/// Resolve the release signing identity under the given policy.
///
/// Logs the outcome; a fallback is a warning unless the policy forbids it.
pub fn resolve_with_policy(
    properties: &SigningProperties,
    policy: SigningPolicy,
) -> Result<Resolution> {
    let resolution = resolve_with_report(properties)?;

    match (&resolution.fallback, policy) {
        (None, _) => {
            if let Some(identity) = resolution.decision.identity() {
                info!(key_alias = %identity.key_alias, "using release signing identity");
            }
        }
        (Some(reason), SigningPolicy::AllowDebugFallback) => {
            warn!(
                source = ?properties.source(),
                %reason,
                "signing properties missing or incomplete, release build will use debug signing"
            );
        }
        (Some(reason), SigningPolicy::RequireRelease) => {
            return Err(SigningError::ReleaseIdentityRequired {
                reason: reason.clone(),
            });
        }
    }

    Ok(resolution)
}

/// Decide the signing identity without emitting anything
pub fn resolve_with_report(properties: &SigningProperties) -> Result<Resolution> {
    if properties.is_empty() {
        return Ok(Resolution::fallback(FallbackReason::Missing));
    }

    let missing: Vec<String> = REQUIRED_KEYS
        .iter()
        .filter(|key| properties.get(key).map_or(true, str::is_empty))
        .map(|key| key.to_string())
        .collect();
    if !missing.is_empty() {
        return Ok(Resolution::fallback(FallbackReason::Incomplete { missing }));
    }

    let identity = SigningIdentity {
        store_file: required(properties, STORE_FILE)?.to_string(),
        store_password: Secret::new(required(properties, STORE_PASSWORD)?),
        key_alias: required(properties, KEY_ALIAS)?.to_string(),
        key_password: Secret::new(required(properties, KEY_PASSWORD)?),
    };

    Ok(Resolution {
        decision: SigningDecision::ReleaseIdentity(identity),
        fallback: None,
    })
}

/// Read a field that completeness already vouched for
fn required<'a>(properties: &'a SigningProperties, key: &str) -> Result<&'a str> {
    properties.get(key).ok_or_else(|| {
        SigningError::configuration(key, format!("missing {} in signing properties", key))
    })
}
