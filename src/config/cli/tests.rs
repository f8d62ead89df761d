//! Tests for CLI argument parsing

use super::*;
use crate::config::{RunConfig, SuggestionConfig};
use std::path::PathBuf;

fn run_args(cli: Cli) -> RunArgs {
    match cli.command {
        Command::Run(args) => args,
        other => panic!("Expected Run command, got {other:?}"),
    }
}

#[test]
fn test_parse_run_command() {
    let cli = parse_args([
        "curriculum",
        "run",
        "--data-directory",
        "session",
        "--input-trainer-state",
        "state.json",
    ])
    .unwrap();
    assert!(!cli.verbose);
    assert!(!cli.quiet);

    let args = run_args(cli);
    assert_eq!(args.data_directory, PathBuf::from("session"));
    assert_eq!(args.input_trainer_state, PathBuf::from("state.json"));
    assert!(!args.mute_suggestion);
    assert_eq!(args.output_suggestion, None);
    assert_eq!(args.config, None);
}

#[test]
fn test_parse_run_with_all_flags() {
    let cli = parse_args([
        "curriculum",
        "-q",
        "run",
        "-d",
        "session",
        "-i",
        "state.json",
        "--mute-suggestion",
        "--output-suggestion",
        "next.json",
        "--config",
        "run.yaml",
    ])
    .unwrap();
    assert!(cli.quiet);

    let args = run_args(cli);
    assert!(args.mute_suggestion);
    assert_eq!(args.output_suggestion, Some(PathBuf::from("next.json")));
    assert_eq!(args.config, Some(PathBuf::from("run.yaml")));
}

#[test]
fn test_parse_run_requires_paths() {
    assert!(parse_args(["curriculum", "run", "--data-directory", "session"]).is_err());
    assert!(parse_args(["curriculum", "run", "--input-trainer-state", "s.json"]).is_err());
}

#[test]
fn test_parse_init_command() {
    let cli = parse_args([
        "curriculum",
        "init",
        "--curriculum",
        "Depletion",
        "--stage",
        "graduation",
        "-o",
        "state.json",
    ])
    .unwrap();
    match cli.command {
        Command::Init(args) => {
            assert_eq!(args.curriculum, "Depletion");
            assert_eq!(args.stage.as_deref(), Some("graduation"));
            assert_eq!(args.output, Some(PathBuf::from("state.json")));
        }
        other => panic!("Expected Init command, got {other:?}"),
    }
}

#[test]
fn test_parse_init_requires_curriculum() {
    assert!(parse_args(["curriculum", "init"]).is_err());
}

#[test]
fn test_parse_list_command() {
    let cli = parse_args(["curriculum", "list"]).unwrap();
    assert_eq!(
        cli.command,
        Command::List(ListArgs { format: OutputFormat::Text, stages: false })
    );

    let cli = parse_args(["curriculum", "list", "--format", "json", "--stages"]).unwrap();
    assert_eq!(
        cli.command,
        Command::List(ListArgs { format: OutputFormat::Json, stages: true })
    );

    assert!(parse_args(["curriculum", "list", "--format", "xml"]).is_err());
}

#[test]
fn test_parse_version_commands() {
    let cli = parse_args(["curriculum", "version"]).unwrap();
    assert_eq!(cli.command, Command::Version);

    let cli = parse_args(["curriculum", "-v", "dsl-version"]).unwrap();
    assert_eq!(cli.command, Command::DslVersion);
    assert!(cli.verbose);
}

#[test]
fn test_parse_unknown_command() {
    assert!(parse_args(["curriculum", "train"]).is_err());
    assert!(parse_args(["curriculum"]).is_err());
}

#[test]
fn test_apply_overrides() {
    let mut config = RunConfig::default();
    let args = run_args(
        parse_args([
            "curriculum",
            "run",
            "-d",
            "session",
            "-i",
            "state.json",
            "-m",
            "-o",
            "next.json",
        ])
        .unwrap(),
    );
    apply_overrides(&mut config, &args);
    assert!(config.suggestion.mute);
    assert_eq!(config.suggestion.output, Some(PathBuf::from("next.json")));
    assert!(config.suggestion.pretty);
}

#[test]
fn test_apply_overrides_keeps_file_values() {
    let mut config = RunConfig {
        suggestion: SuggestionConfig {
            mute: true,
            output: Some(PathBuf::from("from_file.json")),
            pretty: false,
        },
        strict_version: true,
    };
    let args = run_args(parse_args(["curriculum", "run", "-d", "s", "-i", "t.json"]).unwrap());
    let before = config.clone();
    apply_overrides(&mut config, &args);
    assert_eq!(config, before);
}

#[test]
fn test_output_format_parse_display() {
    for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Yaml] {
        assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
    }
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
}
