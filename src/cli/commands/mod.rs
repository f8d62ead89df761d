//! CLI command implementations

mod init;
mod list;
mod run;
mod version;

#[cfg(test)]
mod tests;

use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);

    match cli.command {
        Command::Run(args) => run::run_curriculum(args, log_level),
        Command::Init(args) => init::run_init(args, log_level),
        Command::List(args) => list::run_list(args, log_level),
        Command::Version => version::run_version(log_level),
        Command::DslVersion => version::run_dsl_version(log_level),
    }
}
