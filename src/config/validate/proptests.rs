//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use proptest::prelude::*;
use std::path::PathBuf;

fn arb_config(extension: &'static str) -> impl Strategy<Value = RunConfig> {
    ("[a-z][a-z0-9_]{0,12}", any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        move |(stem, mute, pretty, strict_version)| RunConfig {
            suggestion: SuggestionConfig {
                mute,
                output: Some(PathBuf::from(format!("{stem}.{extension}"))),
                pretty,
            },
            strict_version,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_json_output_passes(config in arb_config("json")) {
        prop_assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn prop_non_json_output_fails(config in arb_config("txt")) {
        prop_assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidOutputExtension(_))
        ));
    }

    #[test]
    fn prop_flags_do_not_affect_validity(mute in any::<bool>(), pretty in any::<bool>()) {
        let config = RunConfig {
            suggestion: SuggestionConfig { mute, output: None, pretty },
            strict_version: false,
        };
        prop_assert!(validate_config(&config).is_ok());
    }
}
