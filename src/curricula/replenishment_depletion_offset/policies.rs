//! Replenishment-rate policy

use crate::curriculum::Policy;
use crate::error::{Error, Result};
use crate::metrics::DepletionCurriculumMetrics;
use crate::numeric::{
    clamp, rate_from_transition_matrix, replenishment_transition_matrix, to_nested, DEFAULT_DT,
    DEFAULT_TIME_CONSTANT,
};
use crate::task::{ProbabilityFunction, RewardFunction, TaskLogic, TaskPath};

/// Largest offset below the template rate, reached at or under the minimum water target.
const MAX_RATE_DROP_PER_SESSION: f64 = 0.03;
/// Water (mL) at or above which the rate is left unchanged.
const TARGET_MAX_WATER: f64 = 1.0;
/// Water (mL) at or below which the rate drops the most.
const TARGET_MIN_WATER: f64 = 0.7;
const MIN_REPLENISHMENT_RATE: f64 = 0.05;
const MAX_REPLENISHMENT_RATE: f64 = 0.25;

/// Slow replenishment down as the subject drinks less.
pub const P_UPDATE_REPLENISHMENT_RATE: Policy<DepletionCurriculumMetrics> = Policy::new(
    "p_update_replenishment_rate",
    &[TaskPath::PatchRewardSpecification],
    update_replenishment_rate,
);

/// Rate decrement for a session's water intake.
pub fn replenishment_gain(total_water_consumed: f64) -> f64 {
    let water = clamp(total_water_consumed, TARGET_MIN_WATER, TARGET_MAX_WATER);
    (TARGET_MAX_WATER - water) / (TARGET_MAX_WATER - TARGET_MIN_WATER) * MAX_RATE_DROP_PER_SESSION
}

pub fn update_replenishment_rate(
    metrics: &DepletionCurriculumMetrics,
    mut task: TaskLogic,
) -> Result<TaskLogic> {
    let gain = replenishment_gain(metrics.total_water_consumed);

    let patches = &mut task
        .task_parameters
        .single_block_mut()?
        .environment_statistics
        .patches;
    for patch in patches {
        let mut candidates = patch
            .reward_specification
            .reward_function
            .iter_mut()
            .filter_map(|function| match function {
                RewardFunction::OutsideRewardFunction {
                    probability: Some(ProbabilityFunction::CtcmFunction { transition_matrix, .. }),
                    ..
                } => Some(transition_matrix),
                _ => None,
            });
        let (Some(matrix), None) = (candidates.next(), candidates.next()) else {
            return Err(Error::structure(format!(
                "patch '{}' must have exactly one outside reward function with a CTCM probability",
                patch.label
            )));
        };

        let rate = rate_from_transition_matrix(matrix, DEFAULT_TIME_CONSTANT, DEFAULT_DT)?;
        let updated = clamp(rate - gain, MIN_REPLENISHMENT_RATE, MAX_REPLENISHMENT_RATE);
        *matrix = to_nested(&replenishment_transition_matrix(
            matrix.len(),
            updated,
            DEFAULT_TIME_CONSTANT,
            DEFAULT_DT,
        )?);
    }
    Ok(task)
}
