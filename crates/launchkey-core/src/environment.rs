//! Build environment injected by the outer framework

use serde::{Deserialize, Deserializer, Serialize};

/// SDK and NDK versions supplied by the surrounding build framework.
///
/// Values are opaque: they are carried into the packaging configuration
/// as given and never validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildEnvironment {
    /// Compile SDK version
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "opaque")]
    pub compile_sdk: Option<String>,

    /// Minimum SDK version
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "opaque")]
    pub min_sdk: Option<String>,

    /// Target SDK version
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "opaque")]
    pub target_sdk: Option<String>,

    /// NDK version
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "opaque")]
    pub ndk_version: Option<String>,
}

impl BuildEnvironment {
    /// Layer `overrides` on top of this environment; set values win
    pub fn merge(self, overrides: BuildEnvironment) -> Self {
        Self {
            compile_sdk: overrides.compile_sdk.or(self.compile_sdk),
            min_sdk: overrides.min_sdk.or(self.min_sdk),
            target_sdk: overrides.target_sdk.or(self.target_sdk),
            ndk_version: overrides.ndk_version.or(self.ndk_version),
        }
    }
}

/// Version numbers may be written as integers or strings
#[derive(Deserialize)]
#[serde(untagged)]
enum OpaqueValue {
    Text(String),
    Integer(i64),
}

fn opaque<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(
        Option::<OpaqueValue>::deserialize(deserializer)?.map(|value| match value {
            OpaqueValue::Text(text) => text,
            OpaqueValue::Integer(number) => number.to_string(),
        }),
    )
}
