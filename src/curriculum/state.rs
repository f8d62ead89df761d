//! Persisted trainer state

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::task::TaskLogic;

/// Identity of the curriculum a state belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumId {
    pub name: String,
    pub version: String,
}

/// Per-subject cursor into a curriculum.
///
/// Written after every session and read back at the start of the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerState {
    pub curriculum: CurriculumId,
    pub stage: String,
    /// Task configuration suggested for the next session.
    pub task_logic: TaskLogic,
    pub active_policies: Vec<String>,
    pub is_on_curriculum: bool,
}

impl TrainerState {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading trainer state {}", path.display()), e))?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json_pretty()?)
            .map_err(|e| Error::io(format!("writing trainer state {}", path.display()), e))
    }
}
