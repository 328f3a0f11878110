//! Check command

use clap::Args;
use tracing::{info, warn};

use launchkey_signing::identity::debug_keystore_path;
use launchkey_signing::{SigningDecision, SigningError};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

use super::ReleaseArgs;

/// Check that release signing is usable
#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub release: ReleaseArgs,
}

impl CheckCommand {
    /// Execute the check command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            require_release = self.release.require_release,
            "executing check command"
        );
        let plan = self.release.plan()?;

        match &plan.packaging.signing {
            SigningDecision::ReleaseIdentity(identity) => {
                let keystore = identity.resolve_store_file(&plan.build_root);
                let fingerprint = identity.keystore_sha256(&plan.build_root)?.ok_or_else(|| {
                    SigningError::configuration(
                        "storeFile",
                        format!("keystore not found at {}", keystore.display()),
                    )
                })?;

                match cli.format {
                    OutputFormat::Json => {
                        let report = serde_json::json!({
                            "identity": "release",
                            "key_alias": identity.key_alias,
                            "keystore": keystore,
                            "keystore_sha256": fingerprint,
                        });
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    }
                    OutputFormat::Text => {
                        if !cli.quiet {
                            output::done(format_args!(
                                "Release signing ready with key '{}'",
                                identity.key_alias
                            ));
                            output::field("Keystore", output::path(&keystore));
                            output::field("SHA-256", &fingerprint);
                        }
                    }
                }
            }
            SigningDecision::DebugIdentity => {
                let debug_keystore = debug_keystore_path();
                let debug_found = debug_keystore.as_ref().is_some_and(|p| p.is_file());
                if !debug_found {
                    warn!(path = ?debug_keystore, "debug keystore not found");
                }

                match cli.format {
                    OutputFormat::Json => {
                        let report = serde_json::json!({
                            "identity": "debug",
                            "fallback": plan.fallback,
                            "debug_keystore": debug_keystore,
                            "debug_keystore_found": debug_found,
                        });
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    }
                    OutputFormat::Text if !cli.quiet => {
                        output::field("Identity", output::identity_label(&plan.packaging.signing));
                        if let Some(reason) = &plan.fallback {
                            output::field("Reason", reason);
                        }
                        if let Some(path) = &debug_keystore {
                            let status = if debug_found { "found" } else { "not found" };
                            output::field(
                                "Debug keystore",
                                format_args!("{} ({})", output::path(path), status),
                            );
                        }
                    }
                    OutputFormat::Text => {}
                }
            }
        }

        Ok(())
    }
}
