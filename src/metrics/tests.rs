//! Tests for metrics extraction

use super::*;
use approx::assert_abs_diff_eq;
use std::fs;
use tempfile::TempDir;

/// Write one JSON-lines event stream into the session directory.
fn write_stream(dir: &TempDir, name: &str, events: &[(f64, serde_json::Value)]) {
    let stream_dir = dir.path().join(SOFTWARE_EVENTS_DIR);
    fs::create_dir_all(&stream_dir).unwrap();
    let body: String = events
        .iter()
        .map(|(t, data)| format!("{}\n", serde_json::json!({"timestamp": t, "data": data})))
        .collect();
    fs::write(stream_dir.join(format!("{name}.json")), body).unwrap();
}

fn minimal_session() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_stream(&dir, "UpdaterStopDurationOffset", &[(0.0, serde_json::json!(0.1)), (5.0, serde_json::json!(0.45))]);
    dir
}

fn full_session() -> TempDir {
    let dir = minimal_session();
    write_stream(&dir, "GiveReward", &[(1.0, serde_json::json!(5.0)), (2.0, serde_json::json!(5.0)), (3.0, serde_json::json!(2.5))]);
    write_stream(&dir, "UpdaterRewardDelayOffset", &[(0.5, serde_json::json!(0.0)), (4.0, serde_json::json!(0.2))]);
    write_stream(
        &dir,
        "ActivePatch",
        &[
            (0.0, serde_json::json!({"state_index": 0})),
            (10.0, serde_json::json!({"state_index": 1})),
            (20.0, serde_json::json!({"state_index": 0})),
            (30.0, serde_json::json!({"state_index": 1})),
        ],
    );
    // choices in patch entries 0 and 2; none during entry 1; entry 3 is last
    write_stream(
        &dir,
        "ChoiceFeedback",
        &[
            (1.0, serde_json::json!(true)),
            (2.0, serde_json::json!(true)),
            (21.0, serde_json::json!(true)),
            (31.0, serde_json::json!(true)),
        ],
    );
    write_stream(
        &dir,
        "ActiveSite",
        &[
            (0.5, serde_json::json!({"label": "InterSite", "length": 20.0})),
            (1.5, serde_json::json!({"label": "RewardSite", "length": 30.0})),
            (2.5, serde_json::json!({"label": "RewardSite", "length": 40.0})),
        ],
    );
    write_stream(&dir, "UpdaterStopVelocityThreshold", &[(0.0, serde_json::json!(60.0)), (9.0, serde_json::json!(42.0))]);
    dir
}

#[test]
fn test_depletion_metrics_full_session() {
    let dir = full_session();
    let metrics = depletion_metrics_from_dataset(dir.path()).unwrap();

    assert_abs_diff_eq!(metrics.total_water_consumed, 0.0125, epsilon = 1e-12);
    assert_eq!(metrics.n_choices, 4);
    assert_eq!(metrics.n_patches_visited_per_patch.get(&0), Some(&2));
    assert_eq!(metrics.n_patches_visited_per_patch.get(&1), Some(&0));
    assert_eq!(metrics.n_patches_visited, 2);
    assert_eq!(metrics.n_reward_sites_traveled, 2);
    assert_eq!(metrics.last_reward_site_length, Some(40.0));
    assert_eq!(metrics.last_delay_duration, Some(0.2));
    assert_eq!(metrics.last_stop_duration_offset_updater, 0.45);
}

#[test]
fn test_missing_streams_zero_fill_counters_and_leave_lengths_absent() {
    let dir = minimal_session();
    let metrics = depletion_metrics_from_dataset(dir.path()).unwrap();

    assert_eq!(metrics.total_water_consumed, 0.0);
    assert_eq!(metrics.n_choices, 0);
    assert_eq!(metrics.n_patches_visited, 0);
    assert_eq!(metrics.n_patches_visited_per_patch, std::collections::BTreeMap::from([(0, 0)]));
    assert_eq!(metrics.n_reward_sites_traveled, 0);
    assert_eq!(metrics.last_reward_site_length, None);
    assert_eq!(metrics.last_delay_duration, None);
}

#[test]
fn test_missing_stop_duration_offset_is_an_error() {
    let dir = TempDir::new().unwrap();
    write_stream(&dir, "GiveReward", &[(1.0, serde_json::json!(5.0))]);

    let err = depletion_metrics_from_dataset(dir.path()).unwrap_err();
    assert!(matches!(err, crate::Error::Dataset { ref stream, .. } if stream == "UpdaterStopDurationOffset"));
}

#[test]
fn test_missing_session_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");
    assert!(depletion_metrics_from_dataset(&missing).is_err());
}

#[test]
fn test_malformed_stream_counts_as_missing() {
    let dir = minimal_session();
    let stream_dir = dir.path().join(SOFTWARE_EVENTS_DIR);
    fs::write(stream_dir.join("GiveReward.json"), "{not json\n").unwrap();

    let metrics = depletion_metrics_from_dataset(dir.path()).unwrap();
    assert_eq!(metrics.total_water_consumed, 0.0);
}

#[test]
fn test_non_numeric_payload_is_an_error() {
    let dir = minimal_session();
    write_stream(&dir, "GiveReward", &[(1.0, serde_json::json!("five"))]);
    assert!(depletion_metrics_from_dataset(dir.path()).is_err());
}

#[test]
fn test_no_reward_sites_leaves_length_absent() {
    let dir = minimal_session();
    write_stream(&dir, "ActiveSite", &[(0.5, serde_json::json!({"label": "InterPatch", "length": 200.0}))]);

    let metrics = depletion_metrics_from_dataset(dir.path()).unwrap();
    assert_eq!(metrics.n_reward_sites_traveled, 0);
    assert_eq!(metrics.last_reward_site_length, None);
}

#[test]
fn test_visits_lookup_defaults_to_zero() {
    let metrics = DepletionCurriculumMetrics {
        n_patches_visited_per_patch: std::collections::BTreeMap::from([(0, 3)]),
        ..Default::default()
    };
    assert_eq!(metrics.visits(0), 3);
    assert_eq!(metrics.visits(7), 0);
}

#[test]
fn test_validate_rejects_negative_values() {
    let metrics = DepletionCurriculumMetrics {
        total_water_consumed: -1.0,
        ..Default::default()
    };
    assert!(metrics.validate().is_err());

    let metrics = DepletionCurriculumMetrics {
        last_reward_site_length: Some(f64::NAN),
        ..Default::default()
    };
    assert!(metrics.validate().is_err());

    assert!(DepletionCurriculumMetrics::default().validate().is_ok());
}

#[test]
fn test_provider_rejects_negative_extracted_values() {
    let dir = minimal_session();
    write_stream(&dir, "GiveReward", &[(1.0, serde_json::json!(-5.0))]);
    match depletion_metrics_from_dataset(dir.path()) {
        Err(Error::InvalidMetrics { field, .. }) => assert_eq!(field, "total_water_consumed"),
        other => panic!("expected InvalidMetrics, got {other:?}"),
    }

    let dir = minimal_session();
    write_stream(&dir, "UpdaterStopDurationOffset", &[(0.0, serde_json::json!(-0.1))]);
    assert!(matches!(
        depletion_metrics_from_dataset(dir.path()),
        Err(Error::InvalidMetrics { .. })
    ));
}

#[test]
fn test_depletion_metrics_json_round_trip() {
    let dir = full_session();
    let metrics = depletion_metrics_from_dataset(dir.path()).unwrap();
    let json = serde_json::to_string(&metrics).unwrap();
    let back: DepletionCurriculumMetrics = serde_json::from_str(&json).unwrap();
    assert_eq!(back, metrics);
}

#[test]
fn test_single_site_metrics_full_session() {
    let dir = full_session();
    let metrics = single_site_metrics_from_dataset(dir.path()).unwrap();

    assert_eq!(metrics.n_patches_seen, 4);
    assert_eq!(metrics.n_patches_visited, 2);
    assert_eq!(metrics.last_stop_threshold_updater, Some(42.0));
    assert_eq!(metrics.last_stop_duration_offset_updater, Some(0.45));
}

#[test]
fn test_single_site_metrics_tolerate_missing_updaters() {
    let dir = TempDir::new().unwrap();
    write_stream(&dir, "GiveReward", &[(1.0, serde_json::json!(1000.0))]);

    let metrics = single_site_metrics_from_dataset(dir.path()).unwrap();
    assert_eq!(metrics.total_water_consumed, 1.0);
    assert_eq!(metrics.n_patches_seen, 0);
    assert_eq!(metrics.last_stop_threshold_updater, None);
    assert_eq!(metrics.last_stop_duration_offset_updater, None);
}
