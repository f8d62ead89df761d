//! Stage transitions of the depletion family

use crate::curriculum::StageTransition;
use crate::metrics::DepletionCurriculumMetrics;

/// Reward sites that must be traveled before depletion is introduced.
pub const MIN_REWARD_SITES_TRAVELED: u32 = 200;
/// Choices that must be made before depletion is introduced.
pub const MIN_CHOICES: u32 = 150;
/// Reward-site length (cm) the subject must have reached.
pub const MIN_REWARD_SITE_LENGTH: f64 = 50.0;
/// Stop-duration offset (s) the subject must have reached.
pub const MIN_STOP_DURATION_OFFSET: f64 = 0.4;

/// Patches visited on day 0 to move on to day 1.
pub const DAY_0_PROMOTION_VISITS: u32 = 20;
/// Patches visited on day 0 to skip straight to all odors.
pub const DAY_0_ALL_ODORS_VISITS: u32 = 40;
/// At most this many patches visited on day 1 sends the subject back.
pub const DAY_1_REGRESSION_VISITS: u32 = 10;
/// Patches visited on day 1 to move on to all odors.
pub const DAY_1_ALL_ODORS_VISITS: u32 = 20;
/// Visits required on each rewarded odor to graduate.
pub const GRADUATION_VISITS_PER_PATCH: u32 = 10;

type Transition = StageTransition<DepletionCurriculumMetrics>;

pub fn no_depletion_to_depletion_day_0(metrics: &DepletionCurriculumMetrics) -> bool {
    let Some(length) = metrics.last_reward_site_length else {
        return false;
    };
    metrics.n_reward_sites_traveled > MIN_REWARD_SITES_TRAVELED
        && metrics.n_choices > MIN_CHOICES
        && length >= MIN_REWARD_SITE_LENGTH
        && metrics.last_stop_duration_offset_updater >= MIN_STOP_DURATION_OFFSET
}

pub fn depletion_day_0_to_day_1(metrics: &DepletionCurriculumMetrics) -> bool {
    metrics.n_patches_visited > DAY_0_PROMOTION_VISITS
}

pub fn depletion_day_0_to_all_odors(metrics: &DepletionCurriculumMetrics) -> bool {
    metrics.n_patches_visited > DAY_0_ALL_ODORS_VISITS
}

pub fn depletion_day_1_to_day_0(metrics: &DepletionCurriculumMetrics) -> bool {
    metrics.n_patches_visited <= DAY_1_REGRESSION_VISITS
}

pub fn depletion_day_1_to_all_odors(metrics: &DepletionCurriculumMetrics) -> bool {
    metrics.n_patches_visited > DAY_1_ALL_ODORS_VISITS
}

pub fn all_odors_to_graduation(metrics: &DepletionCurriculumMetrics) -> bool {
    metrics.visits(0) > GRADUATION_VISITS_PER_PATCH
        && metrics.visits(1) > GRADUATION_VISITS_PER_PATCH
}

pub const ST_NO_DEPLETION_TO_DAY_0: Transition =
    StageTransition::new("st_no_depletion_to_depletion_day_0", no_depletion_to_depletion_day_0);
pub const ST_DAY_0_TO_DAY_1: Transition =
    StageTransition::new("st_depletion_day_0_to_day_1", depletion_day_0_to_day_1);
pub const ST_DAY_0_TO_ALL_ODORS: Transition =
    StageTransition::new("st_depletion_day_0_to_all_odors", depletion_day_0_to_all_odors);
pub const ST_DAY_1_TO_DAY_0: Transition =
    StageTransition::new("st_depletion_day_1_to_day_0", depletion_day_1_to_day_0);
pub const ST_DAY_1_TO_ALL_ODORS: Transition =
    StageTransition::new("st_depletion_day_1_to_all_odors", depletion_day_1_to_all_odors);
pub const ST_ALL_ODORS_TO_GRADUATION: Transition =
    StageTransition::new("st_all_odors_to_graduation", all_odors_to_graduation);
