//! Logging utilities for CLI output
//!
//! Status messages go to stderr so that stdout carries only the JSON
//! documents a command produces.

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output
    Quiet,
    /// Normal output level
    Normal,
    /// Verbose output with additional details
    Verbose,
}

impl LogLevel {
    /// Pick the level from the global `--quiet` / `--verbose` flags; quiet wins.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }

    /// Whether a message at `required` is shown at this level.
    pub fn permits(self, required: LogLevel) -> bool {
        self != LogLevel::Quiet && (self == required || required == LogLevel::Normal)
    }
}

/// Log a message if the current level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level.permits(required) {
        eprintln!("{msg}");
    }
}

/// Log a warning unless output is suppressed
pub fn warn(level: LogLevel, msg: &str) {
    if level != LogLevel::Quiet {
        eprintln!("Warning: {msg}");
    }
}
