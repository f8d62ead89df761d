//! YAML schema for the optional run configuration

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Deserialize a bool from either a YAML boolean (`true`) or a quoted string (`"true"`).
fn deserialize_bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected 'true' or 'false', got '{other}'"
            ))),
        },
    }
}

/// Run configuration for `curriculum run`
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Suggestion output settings
    #[serde(default)]
    pub suggestion: SuggestionConfig,

    /// Treat a curriculum version mismatch as an error instead of a warning
    #[serde(default, deserialize_with = "deserialize_bool_lenient")]
    pub strict_version: bool,
}

/// Where and how the suggestion is emitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuggestionConfig {
    /// Do not print the suggestion to stdout
    #[serde(default, deserialize_with = "deserialize_bool_lenient")]
    pub mute: bool,

    /// Also write the suggestion to this file
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON
    #[serde(default = "default_true", deserialize_with = "deserialize_bool_lenient")]
    pub pretty: bool,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            mute: false,
            output: None,
            pretty: true,
        }
    }
}

fn default_true() -> bool {
    true
}
