//! The `SingleSiteMatching` curriculum
//!
//! Patches hold a single reward site. The subject first learns to stop
//! with two always-rewarded odors, then graduates to blocks with unequal
//! reward and baiting probabilities.

mod policies;
mod stages;


use std::path::Path;

use crate::curriculum::{Curriculum, CurriculumSuggestion, StageTransition, TrainerState};
use crate::error::Result;
use crate::metrics::SingleSiteMatchingMetrics;

pub use policies::{learn_to_stop_single_site, P_LEARN_TO_STOP_SINGLE_SITE};
pub use stages::{
    graduated_stage, learn_to_stop, OdorProfile, GRADUATED_BLOCKS, GRADUATED_STAGE, LEARN_TO_STOP,
};

pub const CURRICULUM_NAME: &str = "SingleSiteMatching";

/// Patches visited before graduating.
pub const GRADUATION_MIN_PATCHES_VISITED: u32 = 100;
/// Stop velocity threshold (cm/s) at or below which stopping is learned.
pub const GRADUATION_MAX_STOP_THRESHOLD: f64 = 10.0;
/// Stop duration offset (s) at or above which stopping is learned.
pub const GRADUATION_MIN_STOP_DURATION_OFFSET: f64 = 0.5;

pub fn learn_to_stop_to_graduated(metrics: &SingleSiteMatchingMetrics) -> bool {
    let (Some(threshold), Some(offset)) = (
        metrics.last_stop_threshold_updater,
        metrics.last_stop_duration_offset_updater,
    ) else {
        return false;
    };
    metrics.n_patches_visited > GRADUATION_MIN_PATCHES_VISITED
        && threshold <= GRADUATION_MAX_STOP_THRESHOLD
        && offset >= GRADUATION_MIN_STOP_DURATION_OFFSET
}

pub const ST_LEARN_TO_STOP_TO_GRADUATED: StageTransition<SingleSiteMatchingMetrics> =
    StageTransition::new("st_learn_to_stop_to_graduated", learn_to_stop_to_graduated);

pub fn curriculum() -> Result<Curriculum<SingleSiteMatchingMetrics>> {
    let mut curriculum = Curriculum::new(CURRICULUM_NAME, crate::VERSION);
    curriculum.add_stage_transition(
        learn_to_stop()?,
        graduated_stage()?,
        ST_LEARN_TO_STOP_TO_GRADUATED,
    )?;
    Ok(curriculum)
}

pub fn enroll(stage: Option<&str>) -> Result<TrainerState> {
    super::enroll_in(&curriculum()?, stage)
}

pub fn run(state: &TrainerState, data_directory: &Path) -> Result<CurriculumSuggestion<serde_json::Value>> {
    super::run_in(&curriculum()?, state, data_directory)
}

pub fn stage_names() -> Result<Vec<String>> {
    Ok(super::stage_names_in(&curriculum()?))
}
