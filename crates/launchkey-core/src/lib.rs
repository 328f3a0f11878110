//! Launchkey Core - Core library for release packaging
//!
//! This crate provides configuration loading, error handling, the injected
//! build environment, dependency declarations and assembly of the release
//! packaging configuration around the signing decision.

pub mod config;
pub mod dependency;
pub mod environment;
pub mod error;
pub mod packaging;

pub use config::{Config, ProjectConfig, SigningConfig};
pub use dependency::{Dependency, VersionSelector};
pub use environment::BuildEnvironment;
pub use error::{ConfigError, DependencyError, LaunchkeyError, Result};
pub use packaging::{prepare_release, PackagingConfig, ReleasePlan};
