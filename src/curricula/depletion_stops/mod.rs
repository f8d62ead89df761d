//! Depletion curricula whose final patches deplete on every stop
//!
//! `DepletionStopsOffset` and `DepletionStopsRate` share the depletion
//! graph and its first three stages. Their all-odors and graduation stages
//! deplete reward probability on each choice instead of each reward, and
//! differ in how the stop-duration updater grows: additively for "offset",
//! multiplicatively for "rate".


use std::collections::BTreeMap;
use std::path::Path;

use super::depletion::{
    self, all_odors_rewarded_task, graduation_task, trained_stop_duration_offset,
    ALL_ODORS_REWARDED, GRADUATION, ST_ALL_ODORS_TO_GRADUATION, ST_DAY_0_TO_ALL_ODORS,
    ST_DAY_1_TO_ALL_ODORS,
};
use crate::curriculum::{Curriculum, CurriculumSuggestion, Stage, TrainerState};
use crate::error::Result;
use crate::metrics::{depletion_metrics_from_dataset, DepletionCurriculumMetrics};
use crate::task::{NumericalUpdaterOperation, RewardFunctionRule, UpdaterTarget};

/// How the stop-duration requirement grows within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopsVariant {
    /// `offset += 0.003` after each successful stop.
    Offset,
    /// `offset *= 1.005` after each successful stop.
    Rate,
}

const OFFSET_ON_SUCCESS: f64 = 0.003;
const RATE_ON_SUCCESS: f64 = 1.005;

impl StopsVariant {
    pub const fn curriculum_name(self) -> &'static str {
        match self {
            Self::Offset => "DepletionStopsOffset",
            Self::Rate => "DepletionStopsRate",
        }
    }

    /// Suffix of the task-logic stage names.
    fn suffix(self) -> &'static str {
        match self {
            Self::Offset => "stops_offset",
            Self::Rate => "stops_rate",
        }
    }

    fn stop_duration_updater(self) -> (NumericalUpdaterOperation, f64) {
        match self {
            Self::Offset => (NumericalUpdaterOperation::Offset, OFFSET_ON_SUCCESS),
            Self::Rate => (NumericalUpdaterOperation::Gain, RATE_ON_SUCCESS),
        }
    }
}

type DepletionStage = Stage<DepletionCurriculumMetrics>;

pub fn all_odors_rewarded(variant: StopsVariant) -> Result<DepletionStage> {
    let task = all_odors_rewarded_task(
        &format!("{ALL_ODORS_REWARDED}_{}", variant.suffix()),
        RewardFunctionRule::OnChoice,
        updaters(variant),
    );
    Ok(Stage::new(ALL_ODORS_REWARDED, task, depletion_metrics_from_dataset))
}

pub fn graduation(variant: StopsVariant) -> Result<DepletionStage> {
    let task = graduation_task(
        &format!("{GRADUATION}_{}", variant.suffix()),
        RewardFunctionRule::OnChoice,
        updaters(variant),
    );
    Ok(Stage::new(GRADUATION, task, depletion_metrics_from_dataset))
}

fn updaters(variant: StopsVariant) -> BTreeMap<UpdaterTarget, crate::task::NumericalUpdater> {
    let (operation, on_success) = variant.stop_duration_updater();
    BTreeMap::from([(
        UpdaterTarget::StopDurationOffset,
        trained_stop_duration_offset(operation, on_success),
    )])
}

pub fn curriculum(variant: StopsVariant) -> Result<Curriculum<DepletionCurriculumMetrics>> {
    let mut curriculum = Curriculum::new(variant.curriculum_name(), crate::VERSION);
    depletion::add_one_odor_stages(&mut curriculum)?;
    curriculum.add_stage_transition(
        depletion::one_odor_w_depletion_day_1()?,
        all_odors_rewarded(variant)?,
        ST_DAY_1_TO_ALL_ODORS,
    )?;
    curriculum.add_stage_transition(
        depletion::one_odor_w_depletion_day_0()?,
        all_odors_rewarded(variant)?,
        ST_DAY_0_TO_ALL_ODORS,
    )?;
    curriculum.add_stage_transition(
        all_odors_rewarded(variant)?,
        graduation(variant)?,
        ST_ALL_ODORS_TO_GRADUATION,
    )?;
    Ok(curriculum)
}

pub mod offset {
    //! Registry hooks for `DepletionStopsOffset`.

    use super::*;

    pub fn enroll(stage: Option<&str>) -> Result<TrainerState> {
        crate::curricula::enroll_in(&curriculum(StopsVariant::Offset)?, stage)
    }

    pub fn run(state: &TrainerState, data_directory: &Path) -> Result<CurriculumSuggestion<serde_json::Value>> {
        crate::curricula::run_in(&curriculum(StopsVariant::Offset)?, state, data_directory)
    }

    pub fn stage_names() -> Result<Vec<String>> {
        Ok(crate::curricula::stage_names_in(&curriculum(StopsVariant::Offset)?))
    }
}

pub mod rate {
    //! Registry hooks for `DepletionStopsRate`.

    use super::*;

    pub fn enroll(stage: Option<&str>) -> Result<TrainerState> {
        crate::curricula::enroll_in(&curriculum(StopsVariant::Rate)?, stage)
    }

    pub fn run(state: &TrainerState, data_directory: &Path) -> Result<CurriculumSuggestion<serde_json::Value>> {
        crate::curricula::run_in(&curriculum(StopsVariant::Rate)?, state, data_directory)
    }

    pub fn stage_names() -> Result<Vec<String>> {
        Ok(crate::curricula::stage_names_in(&curriculum(StopsVariant::Rate)?))
    }
}
