//! Enrollment and per-session evaluation

use std::path::Path;

use super::graph::Curriculum;
use super::policy::Policy;
use super::state::TrainerState;
use super::suggestion::CurriculumSuggestion;
use crate::error::{Error, Result};
use crate::metrics::Metrics;

/// Drives subjects through one curriculum.
///
/// Holds no state of its own; every evaluation is a function of the input
/// state and the session metrics.
#[derive(Debug)]
pub struct Trainer<'c, M> {
    curriculum: &'c Curriculum<M>,
}

impl<'c, M: Metrics> Trainer<'c, M> {
    pub fn new(curriculum: &'c Curriculum<M>) -> Self {
        Self { curriculum }
    }

    pub fn curriculum(&self) -> &'c Curriculum<M> {
        self.curriculum
    }

    /// Fresh state at the entry stage with its start policies active.
    pub fn create_enrollment(&self) -> Result<TrainerState> {
        let entry = self.curriculum.entry_stage()?;
        self.create_trainer_state(entry.name(), None, true)
    }

    /// State at an arbitrary stage.
    ///
    /// `active_policies` defaults to the stage's start policies; explicit
    /// names must resolve to policies known to the curriculum.
    pub fn create_trainer_state(
        &self,
        stage: &str,
        active_policies: Option<&[String]>,
        is_on_curriculum: bool,
    ) -> Result<TrainerState> {
        let stage = self.curriculum.stage(stage)?;
        let active_policies = match active_policies {
            Some(names) => {
                self.resolve_policies(names)?;
                names.to_vec()
            }
            None => stage.start_policy_names(),
        };
        Ok(TrainerState {
            curriculum: self.curriculum.id(),
            stage: stage.name().to_string(),
            task_logic: stage.task().clone(),
            active_policies,
            is_on_curriculum,
        })
    }

    /// One evaluation cycle.
    ///
    /// Active policies are folded over a copy of the current stage's
    /// template, and the FSM step runs on the same metrics. A stage change
    /// discards the policy output: the new stage's template and start
    /// policies are returned instead. Off-curriculum states pass through.
    pub fn evaluate(&self, state: &TrainerState, metrics: &M) -> Result<TrainerState> {
        self.check_curriculum(state)?;
        if !state.is_on_curriculum {
            return Ok(state.clone());
        }

        let current = self.curriculum.stage(&state.stage)?;
        let policies = self.resolve_policies(&state.active_policies)?;
        let task_logic = current.apply_policies(&policies, metrics)?;

        let next = self.curriculum.next_stage(current.name(), metrics)?;
        if next.name() != current.name() {
            return Ok(TrainerState {
                curriculum: self.curriculum.id(),
                stage: next.name().to_string(),
                task_logic: next.task().clone(),
                active_policies: next.start_policy_names(),
                is_on_curriculum: true,
            });
        }

        Ok(TrainerState {
            curriculum: self.curriculum.id(),
            stage: current.name().to_string(),
            task_logic,
            active_policies: state.active_policies.clone(),
            is_on_curriculum: true,
        })
    }

    /// Metrics for `state`'s stage, computed from a session directory.
    pub fn metrics(&self, state: &TrainerState, data_directory: &Path) -> Result<M> {
        self.curriculum.stage(&state.stage)?.metrics(data_directory)
    }

    /// Compute metrics, evaluate, and package the result.
    pub fn suggest(&self, state: &TrainerState, data_directory: &Path) -> Result<CurriculumSuggestion<M>> {
        self.check_curriculum(state)?;
        let metrics = self.metrics(state, data_directory)?;
        let trainer_state = self.evaluate(state, &metrics)?;
        Ok(CurriculumSuggestion::new(trainer_state, metrics, self.curriculum.version()))
    }

    /// Whether `state` was produced by a different version of this curriculum.
    pub fn version_mismatch(&self, state: &TrainerState) -> bool {
        state.curriculum.version != self.curriculum.version()
    }

    fn check_curriculum(&self, state: &TrainerState) -> Result<()> {
        if state.curriculum.name == self.curriculum.name() {
            Ok(())
        } else {
            Err(Error::structure(format!(
                "trainer state belongs to curriculum '{}', not '{}'",
                state.curriculum.name,
                self.curriculum.name()
            )))
        }
    }

    fn resolve_policies(&self, names: &[String]) -> Result<Vec<Policy<M>>> {
        names.iter().map(|name| self.curriculum.policy(name)).collect()
    }
}
