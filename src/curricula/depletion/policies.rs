//! Policies of the depletion family

use crate::curriculum::Policy;
use crate::error::{Error, Result};
use crate::metrics::DepletionCurriculumMetrics;
use crate::numeric::clamp;
use crate::task::{
    Distribution, ProbabilityFunction, RewardFunction, TaskLogic, TaskPath, UpdaterTarget,
    VirtualSiteGenerator,
};

/// Water (mL) after which rewards become stochastic.
const STOCHASTIC_REWARD_MIN_WATER: f64 = 0.75;
const STOCHASTIC_REWARD_PROBABILITY: f64 = 0.9;

const LEARN_TO_RUN_MIN_SITES: u32 = 200;
const LEARN_TO_RUN_SITES_PER_GAIN: f64 = 200.0;
const LEARN_TO_RUN_MAX_GAIN: f64 = 3.0;
const INTER_SITE_GROWTH: f64 = 1.5;
const INTER_SITE_MIN_BOUNDS: (f64, f64) = (10.0, 20.0);
const INTER_SITE_MAX_BOUNDS: (f64, f64) = (30.0, 100.0);
const INTER_PATCH_GROWTH: f64 = 2.0;
const INTER_PATCH_MIN_BOUNDS: (f64, f64) = (25.0, 200.0);
const INTER_PATCH_MAX_BOUNDS: (f64, f64) = (75.0, 600.0);
/// Reward-site length (cm) added per unit of gain.
const REWARD_SITE_STEP: f64 = 10.0;
const REWARD_SITE_BOUNDS: (f64, f64) = (20.0, 50.0);

const LEARN_TO_STOP_MIN_CHOICES: u32 = 100;
/// Stop velocity threshold (cm/s) removed per session.
const STOP_VELOCITY_STEP: f64 = 16.6;
/// Thresholds below this snap to `STOP_VELOCITY_FLOOR`.
const STOP_VELOCITY_SNAP_BELOW: f64 = 15.2;
const STOP_VELOCITY_FLOOR: f64 = 15.0;
/// Stop duration offset (s) added per session.
const STOP_DURATION_STEP: f64 = 0.1;

type DepletionPolicy = Policy<DepletionCurriculumMetrics>;

/// Make the first patch stochastic once enough water was consumed.
pub const P_STOCHASTIC_REWARD: DepletionPolicy = Policy::new(
    "p_stochastic_reward",
    &[TaskPath::PatchRewardSpecification],
    stochastic_reward,
);

/// Lengthen inter-site and inter-patch distances with reward sites traveled.
pub const P_LEARN_TO_RUN: DepletionPolicy =
    Policy::new("p_learn_to_run", &[TaskPath::PatchVirtualSites], learn_to_run);

/// Tighten stopping requirements once the subject makes enough choices.
pub const P_LEARN_TO_STOP: DepletionPolicy =
    Policy::new("p_learn_to_stop", &[TaskPath::Updaters], learn_to_stop);

pub fn stochastic_reward(
    metrics: &DepletionCurriculumMetrics,
    mut task: TaskLogic,
) -> Result<TaskLogic> {
    if metrics.total_water_consumed <= STOCHASTIC_REWARD_MIN_WATER {
        return Ok(task);
    }

    let reward = &mut task
        .task_parameters
        .first_block_mut()?
        .environment_statistics
        .first_patch_mut()?
        .reward_specification;
    reward.probability = Distribution::scalar(STOCHASTIC_REWARD_PROBABILITY);
    for function in &mut reward.reward_function {
        if let RewardFunction::PatchRewardFunction { probability, .. } = function {
            *probability = Some(ProbabilityFunction::SetValueFunction {
                value: Distribution::scalar(STOCHASTIC_REWARD_PROBABILITY),
            });
        }
    }
    Ok(task)
}

pub fn learn_to_run(metrics: &DepletionCurriculumMetrics, mut task: TaskLogic) -> Result<TaskLogic> {
    if metrics.n_reward_sites_traveled <= LEARN_TO_RUN_MIN_SITES {
        return Ok(task);
    }
    // 1 at 200 sites, 2 at 400, capped at 3 from 600
    let gain = (f64::from(metrics.n_reward_sites_traveled) / LEARN_TO_RUN_SITES_PER_GAIN)
        .min(LEARN_TO_RUN_MAX_GAIN);

    let sites = &mut task
        .task_parameters
        .first_block_mut()?
        .environment_statistics
        .first_patch_mut()?
        .patch_virtual_sites_generator;

    grow_truncation(
        &mut sites.inter_site,
        INTER_SITE_GROWTH.powf(gain),
        INTER_SITE_MIN_BOUNDS,
        INTER_SITE_MAX_BOUNDS,
    )?;
    grow_truncation(
        &mut sites.inter_patch,
        INTER_PATCH_GROWTH.powf(gain),
        INTER_PATCH_MIN_BOUNDS,
        INTER_PATCH_MAX_BOUNDS,
    )?;

    let family = sites.reward_site.length_distribution.family();
    let Distribution::Scalar { value } = &mut sites.reward_site.length_distribution else {
        return Err(Error::structure(format!(
            "reward site length must be a scalar, found {family}"
        )));
    };
    *value = clamp(
        *value + REWARD_SITE_STEP * gain,
        REWARD_SITE_BOUNDS.0,
        REWARD_SITE_BOUNDS.1,
    );
    Ok(task)
}

pub fn learn_to_stop(metrics: &DepletionCurriculumMetrics, mut task: TaskLogic) -> Result<TaskLogic> {
    if metrics.n_choices <= LEARN_TO_STOP_MIN_CHOICES {
        return Ok(task);
    }
    let parameters = &mut task.task_parameters;

    let velocity = &mut parameters
        .updater_mut(UpdaterTarget::StopVelocityThreshold)?
        .parameters;
    let mut threshold = velocity.initial_value - STOP_VELOCITY_STEP;
    if threshold < STOP_VELOCITY_SNAP_BELOW {
        threshold = STOP_VELOCITY_FLOOR;
    }
    velocity.initial_value = clamp(threshold, velocity.minimum, velocity.maximum);

    let duration = &mut parameters
        .updater_mut(UpdaterTarget::StopDurationOffset)?
        .parameters;
    duration.initial_value = clamp(
        duration.initial_value + STOP_DURATION_STEP,
        duration.minimum,
        duration.maximum,
    );

    let delay = &mut parameters
        .updater_mut(UpdaterTarget::RewardDelayOffset)?
        .parameters;
    if let Some(last_delay) = metrics.last_delay_duration {
        delay.initial_value = clamp(last_delay, delay.minimum, delay.maximum);
    }
    Ok(task)
}

/// Scale both truncation bounds of an exponential length distribution.
///
/// Each bound is clamped right after scaling; `max` is raised to `min` if
/// the two would cross.
fn grow_truncation(
    site: &mut VirtualSiteGenerator,
    factor: f64,
    min_bounds: (f64, f64),
    max_bounds: (f64, f64),
) -> Result<()> {
    let label = site.label;
    let family = site.length_distribution.family();
    if !matches!(site.length_distribution, Distribution::Exponential { .. }) {
        return Err(Error::structure(format!(
            "{label:?} length must be exponential, found {family}"
        )));
    }
    let truncation = site.length_distribution.truncation_mut().ok_or_else(|| {
        Error::structure(format!("{label:?} length distribution must be truncated"))
    })?;

    truncation.min = clamp(truncation.min * factor, min_bounds.0, min_bounds.1);
    truncation.max = clamp(truncation.max * factor, max_bounds.0, max_bounds.1);
    truncation.max = truncation.max.max(truncation.min);
    Ok(())
}
