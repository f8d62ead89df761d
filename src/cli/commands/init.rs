//! Init command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::InitArgs;
use crate::curricula;

pub fn run_init(args: InitArgs, level: LogLevel) -> Result<(), String> {
    let entry = curricula::find(&args.curriculum).map_err(|e| e.to_string())?;
    let state = (entry.enroll)(args.stage.as_deref()).map_err(|e| e.to_string())?;

    log(
        level,
        LogLevel::Verbose,
        &format!("Enrolled in {} v{} at stage '{}'", entry.name, entry.version, state.stage),
    );

    match &args.output {
        Some(output) => {
            state.write_json_file(output).map_err(|e| e.to_string())?;
            log(
                level,
                LogLevel::Normal,
                &format!("Trainer state written to {}", output.display()),
            );
        }
        None => {
            let json = state.to_json_pretty().map_err(|e| e.to_string())?;
            println!("{json}");
        }
    }

    Ok(())
}
