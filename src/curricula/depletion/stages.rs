//! Stages of the depletion family

use std::collections::BTreeMap;

use super::policies::{P_LEARN_TO_RUN, P_LEARN_TO_STOP, P_STOCHASTIC_REWARD};
use crate::curriculum::Stage;
use crate::error::Result;
use crate::metrics::{depletion_metrics_from_dataset, DepletionCurriculumMetrics};
use crate::task::builders::{default_operation_control, inter_patch, inter_site, reward_site};
use crate::task::{
    Block, BlockSamplingMode, BlockStructure, Distribution, EnvironmentStatistics,
    NumericalUpdater, NumericalUpdaterOperation, OdorSpecification, Patch,
    PatchVirtualSitesGenerator, ProbabilityFunction, RewardFunction, RewardFunctionRule,
    RewardSpecification, TaskLogic, TaskParameters, UpdaterTarget,
};

pub const ONE_ODOR_NO_DEPLETION: &str = "one_odor_no_depletion";
pub const ONE_ODOR_W_DEPLETION_DAY_0: &str = "one_odor_w_depletion_day_0";
pub const ONE_ODOR_W_DEPLETION_DAY_1: &str = "one_odor_w_depletion_day_1";
pub const ALL_ODORS_REWARDED: &str = "all_odors_rewarded";
pub const GRADUATION: &str = "graduation";

/// Spout never retracts during training.
const TIME_TO_COLLECT: f64 = 99_999.0;
const TRAINED_VELOCITY_THRESHOLD: f64 = 8.0;

/// Upper truncation of the untrained site lengths; learn-to-run clamps it.
const UNBOUNDED_LENGTH: f64 = 9_999_999.0;

const REWARD_AMOUNT: f64 = 5.0;
const REWARD_AVAILABLE: f64 = 9_999.0;

/// Odor reward probabilities of the all-odors stages.
pub const ODOR_90_PROBABILITY: f64 = 0.956_943_984_542_9;
pub const ODOR_60_PROBABILITY: f64 = 0.637_962_656_361_981;
/// Per-event multiplicative depletion of the all-odors stages.
pub const ALL_ODORS_DEPLETION_RATE: f64 = 0.940_508_870_8;

const DAY_0_DEPLETION_RATE: f64 = 0.9;
const DAY_1_DEPLETION_RATE: f64 = 0.8;
const ONE_ODOR_PROBABILITY: f64 = 0.9;

type DepletionStage = Stage<DepletionCurriculumMetrics>;

/// Single-odor stage without depletion, where the subject learns to run and stop.
pub fn one_odor_no_depletion() -> Result<DepletionStage> {
    let patch = Patch {
        label: "odor_0".to_string(),
        state_index: 0,
        odor_specification: OdorSpecification { index: 0, concentration: 1.0 },
        reward_specification: RewardSpecification {
            amount: Distribution::scalar(REWARD_AMOUNT),
            probability: Distribution::scalar(1.0),
            available: Distribution::scalar(REWARD_AVAILABLE),
            delay: Distribution::scalar(0.0),
            operant_logic: None,
            reward_function: Vec::new(),
        },
        patch_virtual_sites_generator: PatchVirtualSitesGenerator {
            inter_patch: inter_patch(Distribution::exponential(100.0, 150.0, UNBOUNDED_LENGTH)),
            inter_site: inter_site(Distribution::exponential(15.0, 25.0, UNBOUNDED_LENGTH)),
            reward_site: reward_site(Distribution::scalar(20.0)),
        },
        patch_terminators: Vec::new(),
    };

    let updaters = BTreeMap::from([
        (
            UpdaterTarget::StopDurationOffset,
            NumericalUpdater::new(NumericalUpdaterOperation::Offset, 0.0, 0.003, 0.0, 0.6),
        ),
        (
            UpdaterTarget::RewardDelayOffset,
            NumericalUpdater::new(NumericalUpdaterOperation::Offset, 0.0, -0.002, 0.0, 0.4),
        ),
        (
            UpdaterTarget::StopVelocityThreshold,
            NumericalUpdater::new(NumericalUpdaterOperation::Gain, 60.0, 0.99, 10.0, 60.0),
        ),
    ]);

    let task = task_logic(
        ONE_ODOR_NO_DEPLETION,
        updaters,
        0.0,
        single_block(EnvironmentStatistics {
            patches: vec![patch],
            first_state_occupancy: None,
            transition_matrix: None,
        }),
    );
    Stage::new(ONE_ODOR_NO_DEPLETION, task, depletion_metrics_from_dataset)
        .with_start_policies(vec![P_LEARN_TO_RUN, P_LEARN_TO_STOP, P_STOCHASTIC_REWARD])
}

/// Single odor that depletes with every reward.
pub fn one_odor_w_depletion_day_0() -> Result<DepletionStage> {
    Ok(one_odor_depletion_stage(ONE_ODOR_W_DEPLETION_DAY_0, DAY_0_DEPLETION_RATE))
}

/// As day 0, with faster depletion.
pub fn one_odor_w_depletion_day_1() -> Result<DepletionStage> {
    Ok(one_odor_depletion_stage(ONE_ODOR_W_DEPLETION_DAY_1, DAY_1_DEPLETION_RATE))
}

/// Two rewarded odors depleting on reward.
pub fn all_odors_rewarded() -> Result<DepletionStage> {
    let task = all_odors_rewarded_task(ALL_ODORS_REWARDED, RewardFunctionRule::OnReward, BTreeMap::new());
    Ok(Stage::new(ALL_ODORS_REWARDED, task, depletion_metrics_from_dataset))
}

/// Two rewarded odors plus an unrewarded one.
pub fn graduation() -> Result<DepletionStage> {
    let task = graduation_task(GRADUATION, RewardFunctionRule::OnReward, BTreeMap::new());
    Ok(Stage::new(GRADUATION, task, depletion_metrics_from_dataset))
}

/// Task of the all-odors stage, parameterized for the stop-based variants.
pub(crate) fn all_odors_rewarded_task(
    stage_name: &str,
    rule: RewardFunctionRule,
    updaters: BTreeMap<UpdaterTarget, NumericalUpdater>,
) -> TaskLogic {
    let statistics = EnvironmentStatistics {
        first_state_occupancy: Some(vec![0.5, 0.5]),
        transition_matrix: Some(vec![vec![0.5, 0.5], vec![0.5, 0.5]]),
        patches: vec![
            graduated_patch("odor_90", 0, 1, ODOR_90_PROBABILITY, ALL_ODORS_DEPLETION_RATE, rule),
            graduated_patch("odor_60", 1, 2, ODOR_60_PROBABILITY, ALL_ODORS_DEPLETION_RATE, rule),
        ],
    };
    task_logic(stage_name, updaters, TRAINED_VELOCITY_THRESHOLD, single_block(statistics))
}

/// Task of the graduation stage, parameterized for the stop-based variants.
pub(crate) fn graduation_task(
    stage_name: &str,
    rule: RewardFunctionRule,
    updaters: BTreeMap<UpdaterTarget, NumericalUpdater>,
) -> TaskLogic {
    let row = vec![0.45, 0.45, 0.1];
    let statistics = EnvironmentStatistics {
        first_state_occupancy: Some(row.clone()),
        transition_matrix: Some(vec![row.clone(), row.clone(), row]),
        patches: vec![
            graduated_patch("odor_0", 2, 0, 0.0, 1.0, rule),
            graduated_patch("odor_90", 0, 1, ODOR_90_PROBABILITY, ALL_ODORS_DEPLETION_RATE, rule),
            graduated_patch("odor_60", 1, 2, ODOR_60_PROBABILITY, ALL_ODORS_DEPLETION_RATE, rule),
        ],
    };
    task_logic(stage_name, updaters, TRAINED_VELOCITY_THRESHOLD, single_block(statistics))
}

/// A patch at trained site lengths whose reward probability decays by
/// `depletion_rate` on every `rule` event, starting at `max_reward_probability`.
fn graduated_patch(
    label: &str,
    state_index: u32,
    odor_index: u32,
    max_reward_probability: f64,
    depletion_rate: f64,
    rule: RewardFunctionRule,
) -> Patch {
    Patch {
        label: label.to_string(),
        state_index,
        odor_specification: OdorSpecification { index: odor_index, concentration: 1.0 },
        reward_specification: RewardSpecification {
            amount: Distribution::scalar(REWARD_AMOUNT),
            probability: Distribution::scalar(max_reward_probability),
            available: Distribution::scalar(REWARD_AVAILABLE),
            delay: Distribution::scalar(0.0),
            operant_logic: None,
            reward_function: vec![RewardFunction::PatchRewardFunction {
                probability: Some(ProbabilityFunction::ClampedMultiplicativeRateFunction {
                    minimum: 0.0,
                    maximum: max_reward_probability,
                    rate: Distribution::scalar(depletion_rate),
                }),
                rule,
            }],
        },
        patch_virtual_sites_generator: trained_sites(),
        patch_terminators: Vec::new(),
    }
}

/// Stop-duration offset kept at the level reached before depletion.
pub(crate) fn trained_stop_duration_offset(operation: NumericalUpdaterOperation, on_success: f64) -> NumericalUpdater {
    NumericalUpdater::new(operation, 0.4, on_success, 0.0, 0.6)
}

/// Site lengths reached at the end of the no-depletion stage.
fn trained_sites() -> PatchVirtualSitesGenerator {
    PatchVirtualSitesGenerator {
        inter_patch: inter_patch(Distribution::exponential(1.0 / 300.0, 200.0, 600.0)),
        inter_site: inter_site(Distribution::exponential(1.0 / 30.0, 20.0, 100.0)),
        reward_site: reward_site(Distribution::scalar(50.0)),
    }
}

fn one_odor_depletion_stage(name: &str, depletion_rate: f64) -> DepletionStage {
    let patch = graduated_patch(
        "odor_0",
        0,
        0,
        ONE_ODOR_PROBABILITY,
        depletion_rate,
        RewardFunctionRule::OnReward,
    );
    let updaters = BTreeMap::from([(
        UpdaterTarget::StopDurationOffset,
        trained_stop_duration_offset(NumericalUpdaterOperation::Offset, 0.003),
    )]);
    let task = task_logic(
        name,
        updaters,
        TRAINED_VELOCITY_THRESHOLD,
        single_block(EnvironmentStatistics::uniform(vec![patch])),
    );
    Stage::new(name, task, depletion_metrics_from_dataset)
}

fn single_block(environment_statistics: EnvironmentStatistics) -> BlockStructure {
    BlockStructure {
        blocks: vec![Block { environment_statistics, end_conditions: Vec::new() }],
        sampling_mode: BlockSamplingMode::Sequential,
    }
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
