//! Init command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use launchkey_core::config::defaults::{
    DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML,
};
use launchkey_core::Config;

use crate::cli::output;
use crate::cli::Cli;

/// Initialize a new launchkey configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Write YAML instead of TOML
    #[arg(long)]
    pub yaml: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yaml = self.yaml, "executing init command");
        let cwd = std::env::current_dir()?;
        let default_name = if self.yaml {
            DEFAULT_CONFIG_YAML
        } else {
            DEFAULT_CONFIG_TOML
        };
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(default_name));

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, self.render()?)?;

        if !cli.quiet {
            output::done(format_args!("Created {}", output::path(&config_path)));
            output::hint("Add a key.properties file next to it to enable release signing");
        }

        Ok(())
    }

    fn render(&self) -> anyhow::Result<String> {
        if self.yaml {
            let config: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE)?;
            Ok(serde_yaml::to_string(&config)?)
        } else {
            Ok(DEFAULT_CONFIG_TEMPLATE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_toml_template() {
        let cmd = InitCommand {
            force: false,
            yaml: false,
            output: None,
        };
        let content = cmd.render().unwrap();
        let config: Config = toml::from_str(&content).unwrap();
        assert_eq!(config.signing.properties_file, PathBuf::from("key.properties"));
    }

    #[test]
    fn test_render_yaml_template() {
        let cmd = InitCommand {
            force: false,
            yaml: true,
            output: None,
        };
        let content = cmd.render().unwrap();
        let config: Config = serde_yaml::from_str(&content).unwrap();
        assert_eq!(config.dependencies.len(), 1);
        assert_eq!(config.project.namespace, "com.example.app");
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("launchkey.toml");
        std::fs::write(&path, "existing").unwrap();

        let cli = <Cli as clap::Parser>::try_parse_from(["launchkey", "-q", "init"]).unwrap();
        let cmd = InitCommand {
            force: false,
            yaml: false,
            output: Some(path.clone()),
        };
        assert!(cmd.execute(&cli).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");

        let cmd = InitCommand {
            force: true,
            yaml: false,
            output: Some(path.clone()),
        };
        cmd.execute(&cli).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[signing]"));
    }
}
