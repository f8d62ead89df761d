//! Run command implementation
//!
//! Loads the previous trainer state, evaluates it against the session data
//! and emits the suggestion for the next session.

use crate::cli::logging::{log, warn};
use crate::cli::LogLevel;
use crate::config::{apply_overrides, load_config, validate_config, RunArgs, RunConfig};
use crate::curriculum::TrainerState;
use crate::curricula;

/// Resolve the effective configuration: file values, then CLI overrides.
pub fn resolve_config(args: &RunArgs) -> Result<RunConfig, String> {
    let mut config = match &args.config {
        Some(path) => load_config(path).map_err(|e| e.to_string())?,
        None => RunConfig::default(),
    };
    apply_overrides(&mut config, args);
    validate_config(&config).map_err(|e| format!("Invalid configuration: {e}"))?;
    Ok(config)
}

pub fn run_curriculum(args: RunArgs, level: LogLevel) -> Result<(), String> {
    let config = resolve_config(&args)?;

    log(
        level,
        LogLevel::Verbose,
        &format!("Loading trainer state: {}", args.input_trainer_state.display()),
    );
    let state = TrainerState::from_json_file(&args.input_trainer_state).map_err(|e| e.to_string())?;
    let entry = curricula::find(&state.curriculum.name).map_err(|e| e.to_string())?;

    if state.curriculum.version != entry.version {
        let message = format!(
            "trainer state was produced by {} v{}, running v{}",
            entry.name, state.curriculum.version, entry.version
        );
        if config.strict_version {
            return Err(format!("Version mismatch: {message}"));
        }
        warn(level, &message);
    }

    log(
        level,
        LogLevel::Verbose,
        &format!(
            "Evaluating {} at stage '{}' against {}",
            entry.name,
            state.stage,
            args.data_directory.display()
        ),
    );
    let suggestion = (entry.run)(&state, &args.data_directory).map_err(|e| e.to_string())?;

    let next = &suggestion.trainer_state;
    if next.stage != state.stage {
        log(
            level,
            LogLevel::Normal,
            &format!("Stage transition: {} -> {}", state.stage, next.stage),
        );
    } else {
        log(level, LogLevel::Verbose, &format!("Staying at stage '{}'", next.stage));
    }

    let pretty = config.suggestion.pretty;
    if let Some(output) = &config.suggestion.output {
        suggestion
            .write_json_file(output, pretty)
            .map_err(|e| e.to_string())?;
        log(
            level,
            LogLevel::Normal,
            &format!("Suggestion written to {}", output.display()),
        );
    }

    if !config.suggestion.mute {
        println!("{}", suggestion.to_json(pretty).map_err(|e| e.to_string())?);
    }

    Ok(())
}
