//! List command implementation

use serde::Serialize;

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{ListArgs, OutputFormat};
use crate::curricula::{self, CurriculumEntry};

/// One row of the curriculum listing.
#[derive(Debug, Serialize)]
struct Listing {
    name: &'static str,
    version: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stages: Option<Vec<String>>,
}

fn listing(entry: &CurriculumEntry, with_stages: bool) -> Result<Listing, String> {
    let stages = if with_stages {
        Some((entry.stage_names)().map_err(|e| e.to_string())?)
    } else {
        None
    };
    Ok(Listing {
        name: entry.name,
        version: entry.version,
        description: entry.description,
        stages,
    })
}

/// Render the listing as plain text
pub fn format_listing_text(entries: &[CurriculumEntry], with_stages: bool) -> Result<String, String> {
    let mut lines = Vec::new();
    for entry in entries {
        let row = listing(entry, with_stages)?;
        lines.push(format!("{} (v{})", row.name, row.version));
        lines.push(format!("  {}", row.description));
        for stage in row.stages.iter().flatten() {
            lines.push(format!("    - {stage}"));
        }
    }
    Ok(lines.join("\n"))
}

pub fn run_list(args: ListArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Verbose,
        &format!("{} registered curricula", curricula::CURRICULA.len()),
    );

    match args.format {
        OutputFormat::Text => {
            println!("{}", format_listing_text(curricula::CURRICULA, args.stages)?);
        }
        OutputFormat::Json => {
            let rows = curricula::CURRICULA
                .iter()
                .map(|entry| listing(entry, args.stages))
                .collect::<Result<Vec<_>, _>>()?;
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let rows = curricula::CURRICULA
                .iter()
                .map(|entry| listing(entry, args.stages))
                .collect::<Result<Vec<_>, _>>()?;
            let yaml = serde_yaml::to_string(&rows)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            print!("{yaml}");
        }
    }

    Ok(())
}
