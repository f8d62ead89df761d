//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::RunConfig;

/// Validate a run configuration
///
/// Checks:
/// - The suggestion output path is non-empty and not an existing directory
/// - The suggestion output is a `.json` file
pub fn validate_config(config: &RunConfig) -> Result<(), ValidationError> {
    if let Some(output) = &config.suggestion.output {
        if output.as_os_str().is_empty() {
            return Err(ValidationError::EmptyOutputPath);
        }

        if output.is_dir() {
            return Err(ValidationError::OutputIsDirectory(
                output.display().to_string(),
            ));
        }

        let is_json = output
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if !is_json {
            return Err(ValidationError::InvalidOutputExtension(
                output.display().to_string(),
            ));
        }
    }

    Ok(())
}
