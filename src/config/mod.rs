//! Run configuration and command-line interface
//!
//! A run is configured by an optional YAML file whose values are then
//! overridden by command-line flags.

mod cli;
mod loader;
mod schema;
mod validate;

pub use cli::{
    apply_overrides, parse_args, Cli, Command, InitArgs, ListArgs, OutputFormat, RunArgs,
};
pub use loader::load_config;
pub use schema::{RunConfig, SuggestionConfig};
pub use validate::{validate_config, ValidationError};
