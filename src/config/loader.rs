//! Run configuration loading

use std::fs;
use std::path::Path;

use super::schema::RunConfig;
use super::validate::validate_config;
use crate::error::{Error, Result};

/// Load and validate a run configuration from a YAML file.
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<RunConfig> {
    let path = config_path.as_ref();
    let config_error = |message: String| Error::Config {
        path: path.to_path_buf(),
        message,
    };

    let yaml_content = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read config file {}", path.display()), e))?;

    // An empty document deserializes to unit, not to a map.
    let config: RunConfig = if yaml_content.trim().is_empty() {
        RunConfig::default()
    } else {
        serde_yaml::from_str(&yaml_content)
            .map_err(|e| config_error(format!("Failed to parse YAML config: {e}")))?
    };

    validate_config(&config).map_err(|e| config_error(format!("Invalid config: {e}")))?;

    Ok(config)
}
