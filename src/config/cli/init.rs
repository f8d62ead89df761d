//! Init command types

use clap::Parser;
use std::path::PathBuf;

/// Arguments for the init command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InitArgs {
    /// Registered curriculum name (see `curriculum list`)
    #[arg(short, long)]
    pub curriculum: String,

    /// Enroll at this stage instead of the first one
    #[arg(short, long)]
    pub stage: Option<String>,

    /// Output path for the trainer state (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
