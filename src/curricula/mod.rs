//! Registered curricula
//!
//! A static table maps curriculum names to their enrollment and evaluation
//! entry points. Each entry builds its curriculum graph on demand, so no
//! curriculum outlives the call that uses it.

pub mod depletion;
pub mod depletion_stops;
pub mod replenishment_depletion_offset;
pub mod single_site_matching;

#[cfg(test)]
mod tests;

use std::path::Path;

use crate::curriculum::{Curriculum, CurriculumSuggestion, Trainer, TrainerState};
use crate::error::{Error, Result};
use crate::metrics::Metrics;

/// Enroll a subject, optionally at a named stage.
pub type EnrollFn = fn(Option<&str>) -> Result<TrainerState>;

/// Evaluate a trainer state against a session directory.
pub type RunFn = fn(&TrainerState, &Path) -> Result<CurriculumSuggestion<serde_json::Value>>;

/// Stage names in registration order.
pub type StageNamesFn = fn() -> Result<Vec<String>>;

/// One registered curriculum.
#[derive(Debug, Clone, Copy)]
pub struct CurriculumEntry {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub enroll: EnrollFn,
    pub run: RunFn,
    pub stage_names: StageNamesFn,
}

/// All curricula, sorted by name.
pub const CURRICULA: &[CurriculumEntry] = &[
    CurriculumEntry {
        name: depletion::CURRICULUM_NAME,
        version: crate::VERSION,
        description: "One odor without depletion, then depletion, then all odors rewarded",
        enroll: depletion::enroll,
        run: depletion::run,
        stage_names: depletion::stage_names,
    },
    CurriculumEntry {
        name: depletion_stops::StopsVariant::Offset.curriculum_name(),
        version: crate::VERSION,
        description: "Depletion with final patches depleting on every stop, additive stop updater",
        enroll: depletion_stops::offset::enroll,
        run: depletion_stops::offset::run,
        stage_names: depletion_stops::offset::stage_names,
    },
    CurriculumEntry {
        name: depletion_stops::StopsVariant::Rate.curriculum_name(),
        version: crate::VERSION,
        description: "Depletion with final patches depleting on every stop, multiplicative stop updater",
        enroll: depletion_stops::rate::enroll,
        run: depletion_stops::rate::run,
        stage_names: depletion_stops::rate::stage_names,
    },
    CurriculumEntry {
        name: replenishment_depletion_offset::CURRICULUM_NAME,
        version: crate::VERSION,
        description: "Depletion ending in three patches with Markov-chain replenishment",
        enroll: replenishment_depletion_offset::enroll,
        run: replenishment_depletion_offset::run,
        stage_names: replenishment_depletion_offset::stage_names,
    },
    CurriculumEntry {
        name: single_site_matching::CURRICULUM_NAME,
        version: crate::VERSION,
        description: "Single-site patches: learn to stop, then matching blocks",
        enroll: single_site_matching::enroll,
        run: single_site_matching::run,
        stage_names: single_site_matching::stage_names,
    },
];

/// Look up a curriculum by exact name.
pub fn find(name: &str) -> Result<&'static CurriculumEntry> {
    CURRICULA
        .iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| Error::UnknownCurriculum {
            name: name.to_string(),
            known: names().into_iter().map(str::to_string).collect(),
        })
}

pub fn names() -> Vec<&'static str> {
    CURRICULA.iter().map(|entry| entry.name).collect()
}

pub(crate) fn enroll_in<M: Metrics>(
    curriculum: &Curriculum<M>,
    stage: Option<&str>,
) -> Result<TrainerState> {
    let trainer = Trainer::new(curriculum);
    match stage {
        Some(stage) => trainer.create_trainer_state(stage, None, true),
        None => trainer.create_enrollment(),
    }
}

pub(crate) fn run_in<M: Metrics>(
    curriculum: &Curriculum<M>,
    state: &TrainerState,
    data_directory: &Path,
) -> Result<CurriculumSuggestion<serde_json::Value>> {
    let suggestion = Trainer::new(curriculum).suggest(state, data_directory)?;
    Ok(CurriculumSuggestion {
        metrics: serde_json::to_value(&suggestion.metrics)?,
        trainer_state: suggestion.trainer_state,
        version: suggestion.version,
        dsl_version: suggestion.dsl_version,
    })
}

pub(crate) fn stage_names_in<M: Metrics>(curriculum: &Curriculum<M>) -> Vec<String> {
    curriculum
        .stages()
        .iter()
        .map(|stage| stage.name().to_string())
        .collect()
}
