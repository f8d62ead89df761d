//! Configuration validation
//!
//! Validates run configurations before a suggestion is produced.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::validate_config;
