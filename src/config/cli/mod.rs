//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! curriculum init --curriculum Depletion --output state.json
//! curriculum run --data-directory session/ --input-trainer-state state.json
//! curriculum run -d session/ -i state.json --mute-suggestion --output-suggestion next.json
//! curriculum list --stages
//! ```

mod core;
mod init;
mod types;

#[cfg(test)]
mod tests;

pub use core::{apply_overrides, parse_args, Cli, Command, ListArgs, RunArgs};
pub use init::InitArgs;
pub use types::OutputFormat;
