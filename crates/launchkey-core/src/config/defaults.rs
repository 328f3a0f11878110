//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "launchkey.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "launchkey.yaml";

/// Signing properties file name, relative to the build root
pub const DEFAULT_PROPERTIES_FILE: &str = "key.properties";

/// Subdirectory checked for config at each level of the search
pub const ANDROID_DIR: &str = "android";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".launchkey.toml",
        ".launchkey.yaml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# launchkey configuration

dependencies = [
    "com.google.android.gms:play-services-games-v2:+",
]

[project]
namespace = "com.example.app"
application_id = "com.example.app"
version_code = 1
version_name = "1.0.0"
jvm_target = "11"

# Pass-through values from the outer build framework.
# Override with --compile-sdk/--min-sdk/--target-sdk/--ndk-version.
[environment]
# compile_sdk = "35"
# min_sdk = "21"
# target_sdk = "35"
# ndk_version = "27.0.12077973"

[signing]
properties_file = "key.properties"
# build_root = "android"
# allow_debug_fallback | require_release
policy = "allow_debug_fallback"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Config;
    use crate::config::validation::validate_config;

    #[test]
    fn test_template_is_valid_config() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.dependencies.len(), 1);
    }
}
