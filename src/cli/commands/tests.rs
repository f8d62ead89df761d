//! CLI command tests

use super::*;
use crate::config::*;
use crate::curricula::depletion;
use crate::curriculum::{CurriculumSuggestion, TrainerState};
use crate::metrics::SOFTWARE_EVENTS_DIR;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_stream(root: &Path, name: &str, events: &[(f64, serde_json::Value)]) {
    let stream_dir = root.join(SOFTWARE_EVENTS_DIR);
    fs::create_dir_all(&stream_dir).unwrap();
    let body: String = events
        .iter()
        .map(|(t, data)| format!("{}\n", serde_json::json!({"timestamp": t, "data": data})))
        .collect();
    fs::write(stream_dir.join(format!("{name}.json")), body).unwrap();
}

/// A depletion session in which `visits` patches were visited.
fn depletion_session(dir: &TempDir, visits: u32) -> PathBuf {
    let root = dir.path().join("session");
    write_stream(&root, "UpdaterStopDurationOffset", &[(0.0, serde_json::json!(0.4))]);

    let patches: Vec<_> = (0..=visits)
        .map(|i| (f64::from(i) * 10.0, serde_json::json!({"state_index": 0})))
        .collect();
    let choices: Vec<_> = (0..visits)
        .map(|i| (f64::from(i) * 10.0 + 5.0, serde_json::json!(true)))
        .collect();
    write_stream(&root, "ActivePatch", &patches);
    write_stream(&root, "ChoiceFeedback", &choices);
    root
}

fn init_state(dir: &TempDir, curriculum: &str, stage: Option<&str>) -> PathBuf {
    let output = dir.path().join("state.json");
    let args = InitArgs {
        curriculum: curriculum.to_string(),
        stage: stage.map(str::to_string),
        output: Some(output.clone()),
    };
    init::run_init(args, LogLevel::Quiet).unwrap();
    output
}

fn run_args(data_directory: PathBuf, input_trainer_state: PathBuf, output: PathBuf) -> RunArgs {
    RunArgs {
        data_directory,
        input_trainer_state,
        mute_suggestion: true,
        output_suggestion: Some(output),
        config: None,
    }
}

fn read_suggestion(path: &Path) -> CurriculumSuggestion<serde_json::Value> {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_init_writes_enrollment() {
    let dir = TempDir::new().unwrap();
    let path = init_state(&dir, depletion::CURRICULUM_NAME, None);

    let state = TrainerState::from_json_file(&path).unwrap();
    assert_eq!(state.curriculum.name, depletion::CURRICULUM_NAME);
    assert_eq!(state.stage, depletion::ONE_ODOR_NO_DEPLETION);
    assert!(state.is_on_curriculum);
}

#[test]
fn test_init_unknown_curriculum() {
    let args = InitArgs {
        curriculum: "Nope".to_string(),
        stage: None,
        output: None,
    };
    let err = init::run_init(args, LogLevel::Quiet).unwrap_err();
    assert!(err.contains("Unknown curriculum"));
    assert!(err.contains("Depletion"));
}

#[test]
fn test_run_advances_stage() {
    let dir = TempDir::new().unwrap();
    let state = init_state(&dir, depletion::CURRICULUM_NAME, Some(depletion::ONE_ODOR_W_DEPLETION_DAY_0));
    let session = depletion_session(&dir, 22);
    let output = dir.path().join("suggestion.json");

    run::run_curriculum(run_args(session, state, output.clone()), LogLevel::Quiet).unwrap();

    let suggestion = read_suggestion(&output);
    assert_eq!(suggestion.trainer_state.stage, depletion::ONE_ODOR_W_DEPLETION_DAY_1);
    assert_eq!(suggestion.metrics["n_patches_visited"], 22);
    assert_eq!(suggestion.dsl_version, crate::curriculum::DSL_VERSION);
}

#[test]
fn test_run_stays_below_threshold() {
    let dir = TempDir::new().unwrap();
    let state = init_state(&dir, depletion::CURRICULUM_NAME, Some(depletion::ONE_ODOR_W_DEPLETION_DAY_0));
    let session = depletion_session(&dir, 5);
    let output = dir.path().join("suggestion.json");

    run::run_curriculum(run_args(session, state, output.clone()), LogLevel::Quiet).unwrap();

    let suggestion = read_suggestion(&output);
    assert_eq!(suggestion.trainer_state.stage, depletion::ONE_ODOR_W_DEPLETION_DAY_0);
}

#[test]
fn test_run_missing_required_stream() {
    let dir = TempDir::new().unwrap();
    let state = init_state(&dir, depletion::CURRICULUM_NAME, None);
    let session = dir.path().join("empty_session");
    fs::create_dir_all(&session).unwrap();

    let err = run::run_curriculum(
        run_args(session, state, dir.path().join("suggestion.json")),
        LogLevel::Quiet,
    )
    .unwrap_err();
    assert!(err.contains("UpdaterStopDurationOffset"));
}

#[test]
fn test_run_version_mismatch() {
    let dir = TempDir::new().unwrap();
    let path = init_state(&dir, depletion::CURRICULUM_NAME, None);
    let mut state = TrainerState::from_json_file(&path).unwrap();
    state.curriculum.version = "0.0.1".to_string();
    state.write_json_file(&path).unwrap();
    let session = depletion_session(&dir, 1);
    let output = dir.path().join("suggestion.json");

    // Lenient by default.
    run::run_curriculum(run_args(session.clone(), path.clone(), output.clone()), LogLevel::Quiet)
        .unwrap();
    assert!(output.exists());

    let config = dir.path().join("run.yaml");
    fs::write(&config, "strict_version: true\n").unwrap();
    let mut args = run_args(session, path, output);
    args.config = Some(config);
    let err = run::run_curriculum(args, LogLevel::Quiet).unwrap_err();
    assert!(err.contains("Version mismatch"));
}

#[test]
fn test_resolve_config_overrides_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("run.yaml");
    fs::write(&config, "suggestion:\n  output: from_file.json\n  pretty: false\n").unwrap();

    let args = RunArgs {
        data_directory: PathBuf::from("session"),
        input_trainer_state: PathBuf::from("state.json"),
        mute_suggestion: true,
        output_suggestion: Some(PathBuf::from("from_cli.json")),
        config: Some(config),
    };
    let resolved = run::resolve_config(&args).unwrap();
    assert!(resolved.suggestion.mute);
    assert!(!resolved.suggestion.pretty);
    assert_eq!(resolved.suggestion.output, Some(PathBuf::from("from_cli.json")));
}

#[test]
fn test_resolve_config_rejects_bad_output() {
    let args = RunArgs {
        data_directory: PathBuf::from("session"),
        input_trainer_state: PathBuf::from("state.json"),
        mute_suggestion: false,
        output_suggestion: Some(PathBuf::from("suggestion.txt")),
        config: None,
    };
    let err = run::resolve_config(&args).unwrap_err();
    assert!(err.contains("Invalid configuration"));
}

#[test]
fn test_list_text_includes_stages() {
    let text = list::format_listing_text(crate::curricula::CURRICULA, true).unwrap();
    assert!(text.contains("Depletion (v"));
    assert!(text.contains("    - graduation"));
    assert!(text.contains("SingleSiteMatching"));

    let text = list::format_listing_text(crate::curricula::CURRICULA, false).unwrap();
    assert!(!text.contains("    - "));
}

#[test]
fn test_run_command_dispatch() {
    for command in [
        Command::Version,
        Command::DslVersion,
        Command::List(ListArgs { format: OutputFormat::Json, stages: true }),
        Command::List(ListArgs { format: OutputFormat::Yaml, stages: false }),
    ] {
        let cli = Cli { command, verbose: false, quiet: true };
        assert!(run_command(cli).is_ok());
    }
}
