//! Resolve command

use clap::Args;
use console::style;
use tracing::info;

use launchkey_core::ReleasePlan;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

use super::ReleaseArgs;

/// Resolve the release signing identity and packaging configuration
#[derive(Debug, Args)]
pub struct ResolveCommand {
    #[command(flatten)]
    pub release: ReleaseArgs,
}

impl ResolveCommand {
    /// Execute the resolve command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            require_release = self.release.require_release,
            "executing resolve command"
        );
        let plan = self.release.plan()?;

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            }
            OutputFormat::Text if !cli.quiet => print_plan(&plan, cli.verbose),
            OutputFormat::Text => {}
        }

        Ok(())
    }
}

fn print_plan(plan: &ReleasePlan, verbose: bool) {
    let packaging = &plan.packaging;

    output::section("Packaging", true);
    output::field("Namespace", &packaging.namespace);
    output::field("Application ID", &packaging.application_id);
    output::field(
        "Version",
        format!("{} ({})", packaging.version_name, packaging.version_code),
    );
    output::field("JVM target", &packaging.jvm_target);

    let environment = [
        ("Compile SDK", &packaging.environment.compile_sdk),
        ("Min SDK", &packaging.environment.min_sdk),
        ("Target SDK", &packaging.environment.target_sdk),
        ("NDK", &packaging.environment.ndk_version),
    ];
    for (label, value) in environment {
        if let Some(value) = value {
            output::field(label, value);
        }
    }

    if !packaging.dependencies.is_empty() {
        output::section("Dependencies", false);
        for dependency in &packaging.dependencies {
            let marker = if dependency.version.is_dynamic() {
                style(" (dynamic)").yellow().to_string()
            } else {
                String::new()
            };
            println!("  {}{}", dependency, marker);
        }
    }

    output::section("Release signing", false);
    output::field("Identity", output::identity_label(&packaging.signing));
    match packaging.signing.identity() {
        Some(identity) => {
            output::field("Key alias", &identity.key_alias);
            if let Some(keystore) = &packaging.keystore {
                output::field("Keystore", output::path(keystore));
            }
        }
        // the fallback itself was already logged as a warning
        None => {
            if let Some(reason) = &plan.fallback {
                output::field("Reason", reason);
            }
        }
    }

    if verbose {
        output::field("Properties", output::path(&plan.properties_path));
        output::field("Build root", output::path(&plan.build_root));
    }
}
