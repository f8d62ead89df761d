//! Stages of the single-site matching curriculum

use std::collections::BTreeMap;

use super::policies::P_LEARN_TO_STOP_SINGLE_SITE;
use crate::curriculum::Stage;
use crate::error::Result;
use crate::metrics::{single_site_metrics_from_dataset, SingleSiteMatchingMetrics};
use crate::task::builders::{default_operation_control, site};
use crate::task::{
    Block, BlockEndCondition, BlockSamplingMode, BlockStructure, Distribution,
    EnvironmentStatistics, NumericalUpdater, NumericalUpdaterOperation, OdorSpecification,
    OperantLogic, Patch, PatchTerminator, PatchVirtualSitesGenerator, ProbabilityFunction,
    RewardFunction, RewardFunctionRule, RewardSpecification, ScalingParameters, TaskLogic,
    TaskParameters, TruncationParameters, UpdaterTarget, VirtualSiteGenerator, VirtualSiteLabel,
};

pub const LEARN_TO_STOP: &str = "learn_to_stop";
pub const GRADUATED_STAGE: &str = "graduated_stage";

const MINIMUM_INTERPATCH_LENGTH: f64 = 50.0;
const MEAN_INTERPATCH_LENGTH: f64 = 150.0;
const MAXIMUM_INTERPATCH_LENGTH: f64 = 500.0;
const INTERSITE_LENGTH: f64 = 50.0;
const REWARDSITE_LENGTH: f64 = 50.0;
/// Reward volume (uL).
const REWARD_AMOUNT: f64 = 3.0;
const TIME_TO_COLLECT: f64 = 99_999.0;
const MEAN_EXTRA_PATCHES_PER_BLOCK: f64 = 25.0;
const MAX_EXTRA_PATCHES_PER_BLOCK: u32 = 50;
/// Effectively a single unending block.
const LEARN_TO_STOP_BLOCK_PATCHES: u32 = 100_000;
const GRADUATED_BLOCK_PATCHES: u32 = 100;

/// Reward and baiting probabilities of one odor within a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OdorProfile {
    pub p_reward: f64,
    pub p_replenish: f64,
}

const fn odor(p_reward: f64, p_replenish: f64) -> OdorProfile {
    OdorProfile { p_reward, p_replenish }
}

/// Blocks of the graduated stage, as (odor A, odor B).
pub const GRADUATED_BLOCKS: [[OdorProfile; 2]; 5] = [
    [odor(0.8, 0.4), odor(0.2, 0.1)],
    [odor(0.2, 0.1), odor(0.8, 0.4)],
    [odor(0.5, 0.2), odor(0.5, 0.2)],
    [odor(0.65, 0.325), odor(0.35, 0.175)],
    [odor(0.35, 0.175), odor(0.15, 0.325)],
];

const ODOR_LABELS: [&str; 3] = ["OdorA", "OdorB", "OdorC"];

/// Two always-rewarded odors; stopping requirements tighten within session.
pub fn learn_to_stop() -> Result<Stage<SingleSiteMatchingMetrics>> {
    let updaters = BTreeMap::from([
        (
            UpdaterTarget::StopDurationOffset,
            NumericalUpdater::new(NumericalUpdaterOperation::Offset, 0.0, 0.003, 0.0, 0.6),
        ),
        (
            UpdaterTarget::StopVelocityThreshold,
            NumericalUpdater::new(NumericalUpdaterOperation::Gain, 60.0, 0.995, 10.0, 60.0),
        ),
    ]);
    let environment = BlockStructure {
        blocks: vec![block(&[odor(1.0, 1.0), odor(1.0, 1.0)], LEARN_TO_STOP_BLOCK_PATCHES)?],
        sampling_mode: BlockSamplingMode::Sequential,
    };
    let task = task_logic(LEARN_TO_STOP, updaters, 60.0, environment);

    Stage::new(LEARN_TO_STOP, task, single_site_metrics_from_dataset)
        .with_start_policies(vec![P_LEARN_TO_STOP_SINGLE_SITE])
}

/// Randomly sampled blocks with unequal reward probabilities.
pub fn graduated_stage() -> Result<Stage<SingleSiteMatchingMetrics>> {
    let blocks = GRADUATED_BLOCKS
        .iter()
        .map(|odors| block(odors, GRADUATED_BLOCK_PATCHES))
        .collect::<Result<Vec<_>>>()?;
    let environment = BlockStructure { blocks, sampling_mode: BlockSamplingMode::Random };
    let task = task_logic(GRADUATED_STAGE, BTreeMap::new(), 8.0, environment);
    Ok(Stage::new(GRADUATED_STAGE, task, single_site_metrics_from_dataset))
}

/// A block of up to three odors, ending after about `n_min_patches` patches.
fn block(odors: &[OdorProfile], n_min_patches: u32) -> Result<Block> {
    if odors.is_empty() || odors.len() > ODOR_LABELS.len() {
        return Err(crate::Error::structure(format!(
            "a block holds one to {} odors, got {}",
            ODOR_LABELS.len(),
            odors.len()
        )));
    }
    let patches: Vec<Patch> = odors
        .iter()
        .zip(ODOR_LABELS)
        .zip(0u32..)
        .map(|((profile, label), index)| patch(label, index, *profile))
        .collect();

    let n_min = f64::from(n_min_patches);
    Ok(Block {
        environment_statistics: EnvironmentStatistics::uniform(patches),
        end_conditions: vec![BlockEndCondition::PatchCount {
            value: Distribution::Exponential {
                rate: 1.0 / MEAN_EXTRA_PATCHES_PER_BLOCK,
                truncation_parameters: Some(TruncationParameters::new(
                    n_min,
                    f64::from(n_min_patches + MAX_EXTRA_PATCHES_PER_BLOCK),
                )),
                scaling_parameters: Some(ScalingParameters { scale: 1.0, offset: n_min }),
            },
        }],
    })
}

/// Single reward site; baited back up on entry with probability `p_replenish`.
fn patch(label: &str, index: u32, profile: OdorProfile) -> Patch {
    let baiting = RewardFunction::PersistentRewardFunction {
        probability: Some(ProbabilityFunction::SetValueFunction {
            value: Distribution::Binomial {
                n: 1,
                p: profile.p_replenish,
                truncation_parameters: Some(TruncationParameters::new(profile.p_reward, 1.0)),
                scaling_parameters: Some(ScalingParameters { scale: 1.0, offset: profile.p_reward }),
            },
        }),
        rule: RewardFunctionRule::OnPatchEntry,
    };
    let depletion = RewardFunction::PatchRewardFunction {
        probability: Some(ProbabilityFunction::SetValueFunction {
            value: Distribution::scalar(profile.p_reward),
        }),
        rule: RewardFunctionRule::OnReward,
    };

    Patch {
        label: label.to_string(),
        state_index: index,
        odor_specification: OdorSpecification { index, concentration: 1.0 },
        reward_specification: RewardSpecification {
            amount: Distribution::scalar(REWARD_AMOUNT),
            probability: Distribution::scalar(profile.p_reward),
            available: Distribution::scalar(999_999.0),
            delay: Distribution::scalar(0.5),
            operant_logic: Some(OperantLogic {
                is_operant: false,
                stop_duration: Distribution::scalar(0.5),
                time_to_collect_reward: 100_000.0,
                grace_distance_threshold: 10.0,
            }),
            reward_function: vec![baiting, depletion],
        },
        patch_virtual_sites_generator: PatchVirtualSitesGenerator {
            inter_patch: untextured(
                VirtualSiteLabel::InterPatch,
                1.0,
                Distribution::Exponential {
                    rate: 1.0 / MEAN_INTERPATCH_LENGTH,
                    truncation_parameters: Some(TruncationParameters::new(
                        MINIMUM_INTERPATCH_LENGTH,
                        MAXIMUM_INTERPATCH_LENGTH,
                    )),
                    scaling_parameters: Some(ScalingParameters {
                        scale: 1.0,
                        offset: MINIMUM_INTERPATCH_LENGTH,
                    }),
                },
            ),
            inter_site: untextured(
                VirtualSiteLabel::InterSite,
                0.5,
                Distribution::scalar(INTERSITE_LENGTH),
            ),
            reward_site: untextured(
                VirtualSiteLabel::RewardSite,
                0.5,
                Distribution::scalar(REWARDSITE_LENGTH),
            ),
        },
        patch_terminators: vec![
            PatchTerminator::OnChoice { count: Distribution::scalar(1.0) },
            PatchTerminator::OnRejection { count: Distribution::scalar(1.0) },
        ],
    }
}

/// Site generator without treadmill friction control.
fn untextured(label: VirtualSiteLabel, contrast: f64, length: Distribution) -> VirtualSiteGenerator {
    VirtualSiteGenerator { treadmill_specification: None, ..site(label, contrast, length) }
}

fn task_logic(
    stage_name: &str,
    updaters: BTreeMap<UpdaterTarget, NumericalUpdater>,
    velocity_threshold: f64,
    environment: BlockStructure,
) -> TaskLogic {
    TaskLogic {
        stage_name: stage_name.to_string(),
        task_parameters: TaskParameters {
            rng_seed: None,
            updaters,
            operation_control: default_operation_control(TIME_TO_COLLECT, velocity_threshold),
            environment,
        },
    }
}
