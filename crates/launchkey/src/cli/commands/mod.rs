//! CLI commands

mod check;
mod completions;
mod init;
mod resolve;

pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use resolve::ResolveCommand;

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use launchkey_core::config::{config_base_dir, load_config_or_default};
use launchkey_core::{prepare_release, BuildEnvironment, ReleasePlan};
use launchkey_signing::SigningPolicy;

/// Build environment overrides passed through from the outer framework
#[derive(Debug, Clone, Default, Args)]
pub struct EnvironmentArgs {
    /// Compile SDK version
    #[arg(long, env = "LAUNCHKEY_COMPILE_SDK")]
    pub compile_sdk: Option<String>,

    /// Minimum SDK version
    #[arg(long, env = "LAUNCHKEY_MIN_SDK")]
    pub min_sdk: Option<String>,

    /// Target SDK version
    #[arg(long, env = "LAUNCHKEY_TARGET_SDK")]
    pub target_sdk: Option<String>,

    /// NDK version
    #[arg(long, env = "LAUNCHKEY_NDK_VERSION")]
    pub ndk_version: Option<String>,
}

impl From<&EnvironmentArgs> for BuildEnvironment {
    fn from(args: &EnvironmentArgs) -> Self {
        Self {
            compile_sdk: args.compile_sdk.clone(),
            min_sdk: args.min_sdk.clone(),
            target_sdk: args.target_sdk.clone(),
            ndk_version: args.ndk_version.clone(),
        }
    }
}

/// Options shared by commands that resolve release signing
#[derive(Debug, Clone, Default, Args)]
pub struct ReleaseArgs {
    /// Signing properties file (default: key.properties under the build root)
    #[arg(long)]
    pub properties: Option<PathBuf>,

    /// Fail instead of falling back to debug signing
    #[arg(long)]
    pub require_release: bool,

    #[command(flatten)]
    pub environment: EnvironmentArgs,
}

impl ReleaseArgs {
    /// Load config, read the signing properties and assemble the release plan
    pub fn plan(&self) -> anyhow::Result<ReleasePlan> {
        let cwd = std::env::current_dir()?;
        let (config, config_path) = load_config_or_default(&cwd)?;
        let build_root = config
            .signing
            .resolve_build_root(&config_base_dir(config_path.as_deref(), &cwd));

        let policy = if self.require_release {
            SigningPolicy::RequireRelease
        } else {
            config.signing.policy
        };
        debug!(
            build_root = %build_root.display(),
            %policy,
            "planning release signing"
        );

        let properties = self.properties.as_ref().map(|p| cwd.join(p));
        Ok(prepare_release(
            &config,
            &build_root,
            BuildEnvironment::from(&self.environment),
            policy,
            properties.as_deref(),
        )?)
    }
}
