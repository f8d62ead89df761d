//! The `ReplenishmentDepletionOffset` curriculum
//!
//! Reuses the one-odor depletion stages and ends in a three-patch stage
//! where reward probability replenishes through a continuous-time Markov
//! chain. Each session in the final stage offsets the template rate (0.2)
//! downward when the subject drank less than its target, so the rate stays
//! within [0.17, 0.20] however long the subject remains there.

mod policies;
mod stages;


use std::path::Path;

use super::depletion::{self, ST_DAY_1_TO_ALL_ODORS};
use crate::curriculum::{Curriculum, CurriculumSuggestion, TrainerState};
use crate::error::Result;
use crate::metrics::DepletionCurriculumMetrics;

pub use policies::{replenishment_gain, update_replenishment_rate, P_UPDATE_REPLENISHMENT_RATE};
pub use stages::{mcm_final_stage, PatchProfile, MCM_FINAL_STAGE, PATCH_PROFILES};

pub const CURRICULUM_NAME: &str = "ReplenishmentDepletionOffset";

pub fn curriculum() -> Result<Curriculum<DepletionCurriculumMetrics>> {
    let mut curriculum = Curriculum::new(CURRICULUM_NAME, crate::VERSION);
    depletion::add_one_odor_stages(&mut curriculum)?;
    curriculum.add_stage_transition(
        depletion::one_odor_w_depletion_day_1()?,
        mcm_final_stage()?,
        ST_DAY_1_TO_ALL_ODORS,
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
