//! Metrics for the single-site matching curriculum

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::dataset::SessionDataset;
use super::depletion::patch_visits;
use super::{ensure_non_negative, ensure_non_negative_opt, Metrics};
use crate::error::Result;

const MICROLITERS_PER_MILLILITER: f64 = 1000.0;

/// Session summary used by the single-site matching curriculum.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SingleSiteMatchingMetrics {
    /// Total water (mL) consumed in the session.
    pub total_water_consumed: f64,
    /// Patches in which at least one choice was made.
    pub n_patches_visited: u32,
    /// Patches entered, whether or not a choice was made.
    pub n_patches_seen: u32,
    /// Last stop velocity threshold (cm/s) set by the updater.
    pub last_stop_threshold_updater: Option<f64>,
    /// Last stop duration offset (s) set by the updater.
    pub last_stop_duration_offset_updater: Option<f64>,
}

impl Metrics for SingleSiteMatchingMetrics {
    fn validate(&self) -> Result<()> {
        ensure_non_negative("total_water_consumed", self.total_water_consumed)?;
        ensure_non_negative_opt("last_stop_threshold_updater", self.last_stop_threshold_updater)?;
        ensure_non_negative_opt(
            "last_stop_duration_offset_updater",
            self.last_stop_duration_offset_updater,
        )?;
        Ok(())
    }
}

/// Compute single-site matching metrics from a session directory.
pub fn single_site_metrics_from_dataset(data_directory: &Path) -> Result<SingleSiteMatchingMetrics> {
    let dataset = SessionDataset::open(data_directory)?;

    let total_water_consumed =
        dataset.software_events("GiveReward").sum_f64()? / MICROLITERS_PER_MILLILITER;

    let patches = dataset.software_events("ActivePatch");
    let n_patches_seen = patches
        .events()
        .map_or(0, |events| u32::try_from(events.len()).unwrap_or(u32::MAX));
    let n_patches_visited = patch_visits(&dataset.software_events("ChoiceFeedback"), &patches)?
        .map_or(0, |(_, visits)| visits.values().sum());

    let metrics = SingleSiteMatchingMetrics {
        total_water_consumed,
        n_patches_visited,
        n_patches_seen,
        last_stop_threshold_updater: dataset
            .software_events("UpdaterStopVelocityThreshold")
            .last_f64()?,
        last_stop_duration_offset_updater: dataset
            .software_events("UpdaterStopDurationOffset")
            .last_f64()?,
    };
    metrics.validate()?;
    Ok(metrics)
}
