//! Launchkey Signing - Release signing identity resolution
//!
//! This crate decides which signing identity an Android release artifact
//! is packaged with:
//! - Properties: loading `key.properties` in the Java properties format
//! - Identity: the four-field release identity and the debug fallback
//! - Resolver: the release/debug decision and its fallback reasons

pub mod error;
pub mod identity;
pub mod properties;
pub mod resolver;
pub mod secret;

pub use error::{Result, SigningError};
pub use identity::{SigningDecision, SigningIdentity, DEBUG_KEY_ALIAS};
pub use properties::SigningProperties;
pub use resolver::{
    resolve_signing_identity, resolve_with_policy, resolve_with_report, FallbackReason,
    Resolution, SigningPolicy, REQUIRED_KEYS,
};
pub use secret::Secret;
