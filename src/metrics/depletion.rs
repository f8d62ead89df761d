//! Metrics for the depletion family of curricula

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::dataset::{field_f64, field_u32, EventStream, SessionDataset};
use super::{ensure_non_negative, ensure_non_negative_opt, Metrics};
use crate::error::{Error, Result};

/// Label of reward sites in the `ActiveSite` stream.
const REWARD_SITE_LABEL: &str = "RewardSite";

/// Reward amounts are logged in microliters.
const MICROLITERS_PER_MILLILITER: f64 = 1000.0;

/// Session summary used by the depletion curricula.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DepletionCurriculumMetrics {
    /// Total water (mL) consumed in the session.
    pub total_water_consumed: f64,
    /// Number of reward sites traveled.
    pub n_reward_sites_traveled: u32,
    /// Number of choices (harvest attempts).
    pub n_choices: u32,
    /// Number of patches visited, summed over patch indices.
    pub n_patches_visited: u32,
    /// Patches visited, keyed by patch state index.
    pub n_patches_visited_per_patch: BTreeMap<u32, u32>,
    /// Last offset (s) added to the stop duration.
    pub last_stop_duration_offset_updater: f64,
    /// Length (cm) of the reward site currently implemented.
    pub last_reward_site_length: Option<f64>,
    /// Reward delay (s) currently implemented.
    pub last_delay_duration: Option<f64>,
}

impl DepletionCurriculumMetrics {
    /// Visits to the patch with `state_index`; unseen patches count as zero.
    pub fn visits(&self, state_index: u32) -> u32 {
        self.n_patches_visited_per_patch
            .get(&state_index)
            .copied()
            .unwrap_or(0)
    }
}

impl Metrics for DepletionCurriculumMetrics {
    fn validate(&self) -> Result<()> {
        ensure_non_negative("total_water_consumed", self.total_water_consumed)?;
        ensure_non_negative(
            "last_stop_duration_offset_updater",
            self.last_stop_duration_offset_updater,
        )?;
        ensure_non_negative_opt("last_reward_site_length", self.last_reward_site_length)?;
        ensure_non_negative_opt("last_delay_duration", self.last_delay_duration)?;
        Ok(())
    }
}

/// Compute depletion metrics from a session directory.
pub fn depletion_metrics_from_dataset(data_directory: &Path) -> Result<DepletionCurriculumMetrics> {
    let dataset = SessionDataset::open(data_directory)?;

    let last_delay_duration = dataset
        .software_events("UpdaterRewardDelayOffset")
        .last_f64()?;

    let total_water_consumed =
        dataset.software_events("GiveReward").sum_f64()? / MICROLITERS_PER_MILLILITER;

    let choices = dataset.software_events("ChoiceFeedback");
    let patches = dataset.software_events("ActivePatch");
    let (n_choices, n_patches_visited_per_patch) = match patch_visits(&choices, &patches)? {
        Some((n_choices, visits)) => (n_choices, visits),
        None => (0, BTreeMap::from([(0, 0)])),
    };

    let (n_reward_sites_traveled, last_reward_site_length) =
        reward_sites(&dataset.software_events("ActiveSite"))?;

    let stop_offset = dataset.software_events("UpdaterStopDurationOffset");
    let last_stop_duration_offset_updater = stop_offset
        .last_f64()?
        .ok_or_else(|| Error::dataset(stop_offset.name(), stop_offset.unavailable_reason()))?;

    let metrics = DepletionCurriculumMetrics {
        total_water_consumed,
        n_reward_sites_traveled,
        n_choices,
        n_patches_visited: n_patches_visited_per_patch.values().sum(),
        n_patches_visited_per_patch,
        last_stop_duration_offset_updater,
        last_reward_site_length,
        last_delay_duration,
    };
    metrics.validate()?;
    Ok(metrics)
}

/// Count choices and per-patch visits.
///
/// A patch entry counts as a visit when at least one choice falls strictly
/// between it and the next patch entry. The final entry has no successor
/// and is never counted. Returns `None` when either stream is unusable.
pub(crate) fn patch_visits(
    choices: &EventStream,
    patches: &EventStream,
) -> Result<Option<(u32, BTreeMap<u32, u32>)>> {
    let (Some(choice_events), Some(patch_events)) = (choices.events(), patches.events()) else {
        return Ok(None);
    };

    let mut state_indices = Vec::with_capacity(patch_events.len());
    for event in patch_events {
        state_indices.push(field_u32(patches.name(), &event.data, "state_index")?);
    }

    let mut visits: BTreeMap<u32, u32> = state_indices.iter().map(|&i| (i, 0)).collect();
    for (window, &state_index) in patch_events.windows(2).zip(&state_indices) {
        let (entered, left) = (window[0].timestamp, window[1].timestamp);
        let chose = choice_events
            .iter()
            .any(|c| c.timestamp > entered && c.timestamp < left);
        if chose {
            *visits.entry(state_index).or_insert(0) += 1;
        }
    }

    let n_choices = u32::try_from(choice_events.len()).unwrap_or(u32::MAX);
    Ok(Some((n_choices, visits)))
}

/// Number of reward sites traveled and the length of the last one.
fn reward_sites(sites: &EventStream) -> Result<(u32, Option<f64>)> {
    let Some(events) = sites.events() else {
        return Ok((0, None));
    };

    let reward_sites: Vec<_> = events
        .iter()
        .filter(|e| e.data.get("label").and_then(serde_json::Value::as_str) == Some(REWARD_SITE_LABEL))
        .collect();

    match reward_sites.last() {
        Some(last) => {
            let length = field_f64(sites.name(), &last.data, "length")?;
            let count = u32::try_from(reward_sites.len()).unwrap_or(u32::MAX);
            Ok((count, Some(length)))
        }
        None => Ok((0, None)),
    }
}
