//! Curriculum CLI
//!
//! Enrolls subjects and evaluates their trainer state after each session.
//!
//! # Usage
//!
//! ```bash
//! # Enroll a subject
//! curriculum init --curriculum Depletion --output state.json
//!
//! # Suggest the next session
//! curriculum run --data-directory session_001 --input-trainer-state state.json
//!
//! # Write the suggestion instead of printing it
//! curriculum run -d session_001 -i state.json --mute-suggestion -o next.json
//!
//! # Registered curricula
//! curriculum list --stages
//! ```

use clap::Parser;
use std::process::ExitCode;
use vr_foraging_curricula::cli::{run_command, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
