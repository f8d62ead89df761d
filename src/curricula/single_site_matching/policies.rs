//! Policies of the single-site matching curriculum

use crate::curriculum::Policy;
use crate::error::Result;
use crate::metrics::SingleSiteMatchingMetrics;
use crate::numeric::clamp;
use crate::task::{TaskLogic, TaskPath, UpdaterTarget};

/// Next session starts with a threshold 20% looser than where this one ended.
const STOP_THRESHOLD_RELAXATION: f64 = 1.2;
/// Next session starts with an offset 20% shorter than where this one ended.
const STOP_DURATION_RELAXATION: f64 = 0.8;

/// Resume stopping requirements slightly easier than they ended.
pub const P_LEARN_TO_STOP_SINGLE_SITE: Policy<SingleSiteMatchingMetrics> = Policy::new(
    "p_learn_to_stop_single_site",
    &[TaskPath::Updaters],
    learn_to_stop_single_site,
);

pub fn learn_to_stop_single_site(
    metrics: &SingleSiteMatchingMetrics,
    mut task: TaskLogic,
) -> Result<TaskLogic> {
    if metrics.n_patches_visited == 0 {
        return Ok(task);
    }
    let parameters = &mut task.task_parameters;

    let threshold = &mut parameters
        .updater_mut(UpdaterTarget::StopVelocityThreshold)?
        .parameters;
    if let Some(last) = metrics.last_stop_threshold_updater {
        threshold.initial_value = clamp(
            last * STOP_THRESHOLD_RELAXATION,
            threshold.minimum,
            threshold.maximum,
        );
    }

    let duration = &mut parameters
        .updater_mut(UpdaterTarget::StopDurationOffset)?
        .parameters;
    if let Some(last) = metrics.last_stop_duration_offset_updater {
        duration.initial_value = clamp(
            last * STOP_DURATION_RELAXATION,
            duration.minimum,
            duration.maximum,
        );
    }
    Ok(task)
}
