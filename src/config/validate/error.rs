//! Validation error types

/// Validation error type
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Suggestion output path is empty")]
    EmptyOutputPath,

    #[error("Suggestion output path is a directory: {0}")]
    OutputIsDirectory(String),

    #[error("Suggestion output must be a .json file: {0}")]
    InvalidOutputExtension(String),
}
