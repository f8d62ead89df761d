//! The `Depletion` curriculum
//!
//! ```text
//! one_odor_no_depletion -> one_odor_w_depletion_day_0 <-> one_odor_w_depletion_day_1
//!                                       \                     /
//!                                        all_odors_rewarded -> graduation
//! ```
//!
//! The stages, transitions and policies defined here are shared by the
//! other curricula of the depletion family.

mod policies;
mod stages;
mod transitions;


use std::path::Path;

use crate::curriculum::{Curriculum, CurriculumSuggestion, TrainerState};
use crate::error::Result;
use crate::metrics::DepletionCurriculumMetrics;

pub use policies::{
    learn_to_run, learn_to_stop, stochastic_reward, P_LEARN_TO_RUN, P_LEARN_TO_STOP,
    P_STOCHASTIC_REWARD,
};
pub(crate) use stages::{all_odors_rewarded_task, graduation_task, trained_stop_duration_offset};
pub use stages::{
    all_odors_rewarded, graduation, one_odor_no_depletion, one_odor_w_depletion_day_0,
    one_odor_w_depletion_day_1, ALL_ODORS_DEPLETION_RATE, ALL_ODORS_REWARDED, GRADUATION,
    ODOR_60_PROBABILITY, ODOR_90_PROBABILITY, ONE_ODOR_NO_DEPLETION, ONE_ODOR_W_DEPLETION_DAY_0,
    ONE_ODOR_W_DEPLETION_DAY_1,
};
pub use transitions::*;

pub const CURRICULUM_NAME: &str = "Depletion";

/// Build the curriculum graph.
pub fn curriculum() -> Result<Curriculum<DepletionCurriculumMetrics>> {
    let mut curriculum = Curriculum::new(CURRICULUM_NAME, crate::VERSION);
    add_one_odor_stages(&mut curriculum)?;
    curriculum.add_stage_transition(
        one_odor_w_depletion_day_0()?,
        all_odors_rewarded()?,
        ST_DAY_0_TO_ALL_ODORS,
    )?;
    curriculum.add_stage_transition(
        one_odor_w_depletion_day_1()?,
        all_odors_rewarded()?,
        ST_DAY_1_TO_ALL_ODORS,
    )?;
    curriculum.add_stage_transition(all_odors_rewarded()?, graduation()?, ST_ALL_ODORS_TO_GRADUATION)?;
    Ok(curriculum)
}

/// The shared prefix: no depletion, then the day 0 / day 1 cycle.
///
/// Edges out of day 0 and day 1 added here precede any edge the caller adds.
pub(crate) fn add_one_odor_stages(
    curriculum: &mut Curriculum<DepletionCurriculumMetrics>,
) -> Result<()> {
    curriculum.add_stage_transition(
        one_odor_no_depletion()?,
        one_odor_w_depletion_day_0()?,
        ST_NO_DEPLETION_TO_DAY_0,
    )?;
    curriculum.add_stage_transition(
        one_odor_w_depletion_day_0()?,
        one_odor_w_depletion_day_1()?,
        ST_DAY_0_TO_DAY_1,
    )?;
    curriculum.add_stage_transition(
        one_odor_w_depletion_day_1()?,
        one_odor_w_depletion_day_0()?,
        ST_DAY_1_TO_DAY_0,
    )?;
    Ok(())
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
