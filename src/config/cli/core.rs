//! Core CLI types - Cli, Command, and basic argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::init::InitArgs;
use super::types::OutputFormat;
use crate::config::RunConfig;

/// Curriculum engine for VR foraging experiments
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "curriculum")]
#[command(version)]
#[command(about = "Evaluate VR foraging curricula and suggest the next session's task logic")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Evaluate a trainer state against a session's data
    Run(RunArgs),

    /// Write the initial trainer state of a curriculum
    Init(InitArgs),

    /// List registered curricula
    List(ListArgs),

    /// Print the package version
    Version,

    /// Print the trainer-state schema version
    DslVersion,
}

/// Arguments for the run command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// Session data directory
    #[arg(short, long)]
    pub data_directory: PathBuf,

    /// Trainer state JSON from the previous session
    #[arg(short, long)]
    pub input_trainer_state: PathBuf,

    /// Do not print the suggestion to stdout
    #[arg(short, long)]
    pub mute_suggestion: bool,

    /// Write the suggestion to this JSON file
    #[arg(short, long)]
    pub output_suggestion: Option<PathBuf>,

    /// Optional YAML run configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the list command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ListArgs {
    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Also list each curriculum's stages
    #[arg(short, long)]
    pub stages: bool,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a RunConfig
///
/// Flags only ever switch muting on; an absent flag keeps the file's value.
pub fn apply_overrides(config: &mut RunConfig, args: &RunArgs) {
    if args.mute_suggestion {
        config.suggestion.mute = true;
    }
    if let Some(output) = &args.output_suggestion {
        config.suggestion.output = Some(output.clone());
    }
}
