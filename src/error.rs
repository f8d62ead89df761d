//! Error types with actionable diagnostics.
//!
//! Structural errors point at a misconfigured curriculum definition and are
//! never recovered from. Dataset, I/O and serialization errors surface at the
//! CLI with a non-zero exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for curriculum operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or evaluating a curriculum.
#[derive(Error, Debug)]
pub enum Error {
    /// A structural assumption about the curriculum or task logic was violated.
    #[error("Structural assumption violated: {message}\n  → Check the curriculum definition")]
    Structure { message: String },

    /// Two start policies of a stage declare overlapping task subtrees.
    #[error("Policies '{first}' and '{second}' of stage '{stage}' both touch {path}\n  → Split them across stages or merge them into one policy")]
    PolicyConflict {
        stage: String,
        first: String,
        second: String,
        path: String,
    },

    /// No curriculum is registered under the requested name.
    #[error("Unknown curriculum: {name}\n  → Known curricula: {}", .known.join(", "))]
    UnknownCurriculum { name: String, known: Vec<String> },

    /// A stage name does not exist in the curriculum.
    #[error("Unknown stage '{stage}' in curriculum '{curriculum}'")]
    UnknownStage { curriculum: String, stage: String },

    /// A policy identifier does not exist in the curriculum.
    #[error("Unknown policy '{policy}' in curriculum '{curriculum}'")]
    UnknownPolicy { curriculum: String, policy: String },

    /// A required datastream is absent or malformed.
    #[error("Dataset error in stream '{stream}': {message}\n  → Check that the session data directory is complete")]
    Dataset { stream: String, message: String },

    /// Metrics violate their value invariants.
    #[error("Invalid metrics: field '{field}' {message}")]
    InvalidMetrics { field: String, message: String },

    /// Numeric routine received input it cannot handle.
    #[error("Numeric error: {message}")]
    Numeric { message: String },

    /// Run configuration is invalid.
    #[error("Invalid configuration in {path}: {message}\n  → Check YAML syntax and field values")]
    Config { path: PathBuf, message: String },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl Error {
    /// Create a structural-assumption error.
    pub fn structure(message: impl Into<String>) -> Self {
        Self::Structure { message: message.into() }
    }

    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Create a dataset error for a named stream.
    pub fn dataset(stream: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Dataset { stream: stream.into(), message: message.into() }
    }

    /// Check if this error is caused by user input rather than a curriculum bug.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCurriculum { .. }
                | Self::UnknownStage { .. }
                | Self::UnknownPolicy { .. }
                | Self::Dataset { .. }
                | Self::InvalidMetrics { .. }
                | Self::Config { .. }
                | Self::Io { .. }
                | Self::Serialization { .. }
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Structure { .. } => "E001",
            Self::PolicyConflict { .. } => "E002",
            Self::UnknownCurriculum { .. } => "E010",
            Self::UnknownStage { .. } => "E011",
            Self::UnknownPolicy { .. } => "E012",
            Self::Dataset { .. } => "E020",
            Self::InvalidMetrics { .. } => "E021",
            Self::Numeric { .. } => "E030",
            Self::Config { .. } => "E040",
            Self::Io { .. } => "E050",
            Self::Serialization { .. } => "E051",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization { message: err.to_string() }
    }
}
