//! Suggestion output of one evaluation

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::state::TrainerState;
use super::DSL_VERSION;
use crate::error::{Error, Result};

/// Next trainer state together with the metrics that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurriculumSuggestion<M> {
    pub trainer_state: TrainerState,
    pub metrics: M,
    /// Version of the curriculum definition.
    pub version: String,
    /// Version of the trainer-state schema.
    pub dsl_version: String,
}

impl<M: Serialize> CurriculumSuggestion<M> {
    pub fn new(trainer_state: TrainerState, metrics: M, version: impl Into<String>) -> Self {
        Self {
            trainer_state,
            metrics,
            version: version.into(),
            dsl_version: DSL_VERSION.to_string(),
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub fn write_json_file(&self, path: &Path, pretty: bool) -> Result<()> {
        fs::write(path, self.to_json(pretty)?)
            .map_err(|e| Error::io(format!("writing suggestion {}", path.display()), e))
    }
}
