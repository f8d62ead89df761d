//! Final stage with replenishing patches

use super::policies::P_UPDATE_REPLENISHMENT_RATE;
use crate::curriculum::Stage;
use crate::error::Result;
use crate::metrics::{depletion_metrics_from_dataset, DepletionCurriculumMetrics};
use crate::numeric::{replenishment_transition_matrix, to_nested, DEFAULT_DT, DEFAULT_TIME_CONSTANT};
use crate::task::builders::{default_operation_control, site};
use crate::task::{
    Block, BlockSamplingMode, BlockStructure, Distribution, EnvironmentStatistics, OdorSpecification,
    OperantLogic, Patch, PatchVirtualSitesGenerator, ProbabilityFunction, RewardFunction,
    RewardFunctionRule, RewardSpecification, TaskLogic, TaskParameters, VirtualSiteLabel,
};

pub const MCM_FINAL_STAGE: &str = "mcm_final_stage";

const TIME_TO_COLLECT: f64 = 99_999.0;
const VELOCITY_THRESHOLD: f64 = 8.0;
/// Reward volume (uL).
const REWARD_AMOUNT: f64 = 5.0;
const REPLENISHMENT_RATE: f64 = 0.2;
const RHO: f64 = 0.9;
/// Seconds outside a patch before it starts replenishing.
const REPLENISHMENT_DELAY: f64 = 5.0;
const MIN_REWARD_PROBABILITY: f64 = 0.2;
const MEAN_INTER_SITE_LENGTH: f64 = 20.0;
const MAX_INTER_SITE_LENGTH: f64 = 100.0;
const REWARD_SITE_LENGTH: f64 = 50.0;

/// Per-patch parameters of the final stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchProfile {
    pub label: &'static str,
    pub max_reward_probability: f64,
    pub depletion_rate: f64,
    /// Discrete reward-probability states of the replenishment chain.
    pub n_states: usize,
    /// Inter-patch distance (cm).
    pub inter_patch_length: f64,
}

/// Patches in the order A, B, C; the environment cycles through them.
pub const PATCH_PROFILES: [PatchProfile; 3] = [
    PatchProfile {
        label: "High",
        max_reward_probability: 1.0,
        depletion_rate: 0.9,
        n_states: 16,
        inter_patch_length: 420.0,
    },
    PatchProfile {
        label: "Medium",
        max_reward_probability: 0.7,
        depletion_rate: 0.81,
        n_states: 12,
        inter_patch_length: 280.0,
    },
    PatchProfile {
        label: "Low",
        max_reward_probability: 0.4,
        depletion_rate: 0.729,
        n_states: 7,
        inter_patch_length: 140.0,
    },
];

/// Three patches that deplete on reward and replenish over time outside.
pub fn mcm_final_stage() -> Result<Stage<DepletionCurriculumMetrics>> {
    let patches = PATCH_PROFILES
        .iter()
        .zip(0u32..)
        .map(|(profile, index)| replenishing_patch(profile, index))
        .collect::<Result<Vec<_>>>()?;

    let environment_statistics = EnvironmentStatistics {
        first_state_occupancy: Some(vec![0.33, 0.33, 0.33]),
        transition_matrix: Some(vec![
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![1.0, 0.0, 0.0],
        ]),
        patches,
    };

    let task = TaskLogic {
        stage_name: MCM_FINAL_STAGE.to_string(),
        task_parameters: TaskParameters {
            rng_seed: None,
            updaters: Default::default(),
            operation_control: default_operation_control(TIME_TO_COLLECT, VELOCITY_THRESHOLD),
            environment: BlockStructure {
                blocks: vec![Block { environment_statistics, end_conditions: Vec::new() }],
                sampling_mode: BlockSamplingMode::Random,
            },
        },
    };

    Stage::new(MCM_FINAL_STAGE, task, depletion_metrics_from_dataset)
        .with_start_policies(vec![P_UPDATE_REPLENISHMENT_RATE])
}

fn replenishing_patch(profile: &PatchProfile, index: u32) -> Result<Patch> {
    let transition_matrix = to_nested(&replenishment_transition_matrix(
        profile.n_states,
        REPLENISHMENT_RATE,
        DEFAULT_TIME_CONSTANT,
        DEFAULT_DT,
    )?);

    let depletion = RewardFunction::PatchRewardFunction {
        probability: Some(ProbabilityFunction::ClampedMultiplicativeRateFunction {
            minimum: MIN_REWARD_PROBABILITY,
            maximum: profile.max_reward_probability,
            rate: Distribution::scalar(profile.depletion_rate),
        }),
        rule: RewardFunctionRule::OnReward,
    };
    let replenishment = RewardFunction::OutsideRewardFunction {
        probability: Some(ProbabilityFunction::CtcmFunction {
            transition_matrix,
            minimum: MIN_REWARD_PROBABILITY,
            maximum: profile.max_reward_probability,
            rho: RHO,
        }),
        delay: REPLENISHMENT_DELAY,
        rule: RewardFunctionRule::OnTime,
    };

    let mut inter_patch = site(
        VirtualSiteLabel::InterPatch,
        1.0,
        Distribution::scalar(profile.inter_patch_length),
    );
    let mut inter_site = site(
        VirtualSiteLabel::InterSite,
        0.5,
        Distribution::exponential(
            1.0 / MEAN_INTER_SITE_LENGTH,
            MEAN_INTER_SITE_LENGTH,
            MAX_INTER_SITE_LENGTH,
        ),
    );
    let mut reward_site = site(
        VirtualSiteLabel::RewardSite,
        0.5,
        Distribution::scalar(REWARD_SITE_LENGTH),
    );
    for generator in [&mut inter_patch, &mut inter_site, &mut reward_site] {
        generator.treadmill_specification = None;
    }

    Ok(Patch {
        label: profile.label.to_string(),
        state_index: index,
        odor_specification: OdorSpecification { index, concentration: 1.0 },
        reward_specification: RewardSpecification {
            amount: Distribution::scalar(REWARD_AMOUNT),
            probability: Distribution::scalar(profile.max_reward_probability),
            available: Distribution::scalar(999_999.0),
            delay: Distribution::scalar(0.5),
            operant_logic: Some(OperantLogic {
                is_operant: false,
                stop_duration: Distribution::scalar(0.5),
                time_to_collect_reward: 100_000.0,
                grace_distance_threshold: 10.0,
            }),
            reward_function: vec![depletion, replenishment],
        },
        patch_virtual_sites_generator: PatchVirtualSitesGenerator {
            inter_patch,
            inter_site,
            reward_site,
        },
        patch_terminators: Vec::new(),
    })
}
