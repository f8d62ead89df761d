//! End-to-end tests of the `init` and `run` commands over temporary sessions

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use vr_foraging_curricula::cli::run_command;
use vr_foraging_curricula::config::parse_args;
use vr_foraging_curricula::curricula::single_site_matching;
use vr_foraging_curricula::curriculum::{CurriculumSuggestion, TrainerState};
use vr_foraging_curricula::metrics::{SingleSiteMatchingMetrics, SOFTWARE_EVENTS_DIR};

fn write_stream(root: &Path, name: &str, events: &[(f64, serde_json::Value)]) {
    let stream_dir = root.join(SOFTWARE_EVENTS_DIR);
    fs::create_dir_all(&stream_dir).unwrap();
    let body: String = events
        .iter()
        .map(|(t, data)| format!("{}\n", serde_json::json!({"timestamp": t, "data": data})))
        .collect();
    fs::write(stream_dir.join(format!("{name}.json")), body).unwrap();
}

fn single_site_session(root: &Path, visits: u32, threshold: f64, offset: f64) {
    let patches: Vec<_> = (0..=visits)
        .map(|i| (f64::from(i) * 10.0, serde_json::json!({"state_index": i % 2})))
        .collect();
    let choices: Vec<_> = (0..visits)
        .map(|i| (f64::from(i) * 10.0 + 4.0, serde_json::json!(true)))
        .collect();
    let rewards: Vec<_> = (0..visits)
        .map(|i| (f64::from(i) * 10.0 + 5.0, serde_json::json!(5.0)))
        .collect();
    write_stream(root, "ActivePatch", &patches);
    write_stream(root, "ChoiceFeedback", &choices);
    write_stream(root, "GiveReward", &rewards);
    write_stream(root, "UpdaterStopVelocityThreshold", &[(0.0, serde_json::json!(threshold))]);
    write_stream(root, "UpdaterStopDurationOffset", &[(0.0, serde_json::json!(offset))]);
}

fn run(args: &[&str]) -> Result<(), String> {
    let cli = parse_args(std::iter::once("curriculum").chain(args.iter().copied()))
        .map_err(|e| e.to_string())?;
    run_command(cli)
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn arg(&self, name: &str) -> String {
        self.path(name).display().to_string()
    }
}

#[test]
fn single_site_session_cycle() {
    let ws = Workspace::new();
    run(&["-q", "init", "--curriculum", "SingleSiteMatching", "--output", &ws.arg("state.json")])
        .unwrap();

    // Session 1: stopping not learned yet.
    single_site_session(&ws.path("s1"), 40, 30.0, 0.2);
    run(&[
        "-q",
        "run",
        "--data-directory",
        &ws.arg("s1"),
        "--input-trainer-state",
        &ws.arg("state.json"),
        "--mute-suggestion",
        "--output-suggestion",
        &ws.arg("s1.json"),
    ])
    .unwrap();

    let first: CurriculumSuggestion<SingleSiteMatchingMetrics> =
        serde_json::from_str(&fs::read_to_string(ws.path("s1.json")).unwrap()).unwrap();
    assert_eq!(first.trainer_state.stage, single_site_matching::LEARN_TO_STOP);
    assert_eq!(first.metrics.n_patches_visited, 40);
    assert_eq!(first.metrics.n_patches_seen, 41);
    assert!((first.metrics.total_water_consumed - 0.2).abs() < 1e-12);
    first.trainer_state.write_json_file(&ws.path("state.json")).unwrap();

    // Session 2: graduates.
    single_site_session(&ws.path("s2"), 101, 9.0, 0.55);
    run(&[
        "-q",
        "run",
        "-d",
        &ws.arg("s2"),
        "-i",
        &ws.arg("state.json"),
        "-m",
        "-o",
        &ws.arg("s2.json"),
    ])
    .unwrap();

    let second: CurriculumSuggestion<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(ws.path("s2.json")).unwrap()).unwrap();
    assert_eq!(second.trainer_state.stage, single_site_matching::GRADUATED_STAGE);
    assert!(second.trainer_state.active_policies.is_empty());
    assert_eq!(second.version, vr_foraging_curricula::VERSION);
}

#[test]
fn run_with_yaml_config() {
    let ws = Workspace::new();
    run(&["-q", "init", "-c", "SingleSiteMatching", "-o", &ws.arg("state.json")]).unwrap();
    single_site_session(&ws.path("s1"), 3, 20.0, 0.1);
    fs::write(
        ws.path("run.yaml"),
        format!(
            "suggestion:\n  mute: true\n  pretty: false\n  output: {}\n",
            ws.arg("from_config.json")
        ),
    )
    .unwrap();

    run(&[
        "-q",
        "run",
        "-d",
        &ws.arg("s1"),
        "-i",
        &ws.arg("state.json"),
        "--config",
        &ws.arg("run.yaml"),
    ])
    .unwrap();

    let written = fs::read_to_string(ws.path("from_config.json")).unwrap();
    assert!(!written.contains('\n'));
    let suggestion: CurriculumSuggestion<serde_json::Value> = serde_json::from_str(&written).unwrap();
    assert_eq!(suggestion.trainer_state.stage, single_site_matching::LEARN_TO_STOP);
}

#[test]
fn run_reports_errors() {
    let ws = Workspace::new();

    let err = run(&["-q", "run", "-d", &ws.arg("s1"), "-i", &ws.arg("missing.json")]).unwrap_err();
    assert!(err.contains("missing.json"));

    run(&["-q", "init", "-c", "Depletion", "-o", &ws.arg("state.json")]).unwrap();
    let mut state = TrainerState::from_json_file(&ws.path("state.json")).unwrap();
    state.curriculum.name = "Retired".to_string();
    state.write_json_file(&ws.path("state.json")).unwrap();
    fs::create_dir_all(ws.path("s1")).unwrap();

    let err = run(&["-q", "run", "-d", &ws.arg("s1"), "-i", &ws.arg("state.json")]).unwrap_err();
    assert!(err.contains("Unknown curriculum: Retired"));

    let err = run(&["-q", "init", "-c", "Depletion", "--stage", "nowhere"]).unwrap_err();
    assert!(err.contains("nowhere"));
}
