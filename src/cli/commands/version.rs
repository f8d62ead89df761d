//! Version commands

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::curriculum::DSL_VERSION;

pub fn run_version(level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Verbose, "Package version:");
    println!("{}", crate::VERSION);
    Ok(())
}

pub fn run_dsl_version(level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Verbose, "Trainer-state schema version:");
    println!("{DSL_VERSION}");
    Ok(())
}
