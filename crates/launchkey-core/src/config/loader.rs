//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::{config_file_names, ANDROID_DIR};
use super::types::Config;
use super::validation::validate_config;

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = if path
        .extension()
        .is_some_and(|e| e == "yaml" || e == "yml")
    {
        "YAML"
    } else {
        "TOML"
    };
    info!(path = %path.display(), format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let config: Config = if format == "TOML" {
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    } else {
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    };

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// At each directory level the search checks:
///   1. `<dir>/<name>`          (e.g. `launchkey.toml`)
///   2. `<dir>/android/<name>`  (e.g. `android/launchkey.toml`)
///
/// The first match wins. Parents are walked until the filesystem root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.is_file() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }

            let android_path = current.join(ANDROID_DIR).join(name);
            if android_path.is_file() {
                info!(path = %android_path.display(), "found config file in android/");
                return Some(android_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration or use defaults.
///
/// Only a missing config falls back to defaults; a config that exists but
/// fails to parse or validate is an error.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    match find_config(dir) {
        Some(path) => Ok((load_config(&path)?, Some(path))),
        None => {
            warn!(dir = %dir.display(), "no config found, using defaults");
            Ok((Config::default(), None))
        }
    }
}

/// Directory relative paths in a config are resolved against
pub fn config_base_dir(config_path: Option<&Path>, cwd: &Path) -> PathBuf {
    config_path
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL_TOML: &str = "[project]\nnamespace = \"com.example.game\"\n";

    #[test]
    fn test_find_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("launchkey.toml");
        std::fs::write(&config_path, MINIMAL_TOML).unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_toml_over_yaml() {
        let temp = TempDir::new().unwrap();
        let toml_path = temp.path().join("launchkey.toml");
        let yaml_path = temp.path().join("launchkey.yaml");
        std::fs::write(&toml_path, MINIMAL_TOML).unwrap();
        std::fs::write(&yaml_path, "project:\n  namespace: com.example.game\n").unwrap();

        let found = find_config(temp.path()).unwrap();
        assert_eq!(found, toml_path);
    }

    #[test]
    fn test_find_config_in_android_dir() {
        let temp = TempDir::new().unwrap();
        let android_dir = temp.path().join("android");
        std::fs::create_dir_all(&android_dir).unwrap();
        let config_path = android_dir.join("launchkey.toml");
        std::fs::write(&config_path, MINIMAL_TOML).unwrap();

        assert_eq!(find_config(temp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("launchkey.toml");
        std::fs::write(&config_path, MINIMAL_TOML).unwrap();
        let nested = temp.path().join("android").join("app");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config(&nested), Some(config_path));
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("launchkey.yaml");
        std::fs::write(
            &config_path,
            "project:\n  namespace: com.example.game\n  version_code: 7\ndependencies:\n  - com.google.android.gms:play-services-games-v2:+\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.project.namespace, "com.example.game");
        assert_eq!(config.project.version_code, 7);
        assert_eq!(config.dependencies.len(), 1);
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("launchkey.toml");
        std::fs::write(&config_path, "[project]\nversion_code = 0\n").unwrap();

        assert!(load_config(&config_path).is_err());
    }

    #[test]
    fn test_load_config_or_default_without_config() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load_config_or_default(temp.path()).unwrap();
        assert!(path.is_none());
        assert_eq!(config.project.namespace, "com.example.app");
    }

    #[test]
    fn test_config_base_dir() {
        let cwd = Path::new("/work");
        assert_eq!(config_base_dir(None, cwd), PathBuf::from("/work"));
        assert_eq!(
            config_base_dir(Some(Path::new("/project/android/launchkey.toml")), cwd),
            PathBuf::from("/project/android")
        );
    }
}
