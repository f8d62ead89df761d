//! Task parameter tree for the VR foraging task

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::distribution::Distribution;
use super::reward::RewardSpecification;
use crate::error::{Error, Result};

/// Task configuration suggested for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskLogic {
    pub stage_name: String,
    pub task_parameters: TaskParameters,
}

/// Root of the parameter tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskParameters {
    #[serde(default)]
    pub rng_seed: Option<u64>,
    #[serde(default)]
    pub updaters: BTreeMap<UpdaterTarget, NumericalUpdater>,
    pub operation_control: OperationControl,
    pub environment: BlockStructure,
}

impl TaskParameters {
    /// The only block of a single-block environment.
    pub fn single_block_mut(&mut self) -> Result<&mut Block> {
        match self.environment.blocks.as_mut_slice() {
            [block] => Ok(block),
            blocks => Err(Error::structure(format!(
                "expected exactly one environment block, found {}",
                blocks.len()
            ))),
        }
    }

    /// The first block, which holds the default patches.
    pub fn first_block_mut(&mut self) -> Result<&mut Block> {
        self.environment
            .blocks
            .first_mut()
            .ok_or_else(|| Error::structure("expected at least one environment block"))
    }

    /// The updater for `target`, which the policy requires to exist.
    pub fn updater_mut(&mut self, target: UpdaterTarget) -> Result<&mut NumericalUpdater> {
        self.updaters
            .get_mut(&target)
            .ok_or_else(|| Error::structure(format!("expected an updater for {target:?}")))
    }
}

/// Task quantities adjusted online by the task engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UpdaterTarget {
    StopDurationOffset,
    StopVelocityThreshold,
    RewardDelayOffset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericalUpdaterOperation {
    /// `value += on_success`
    Offset,
    /// `value *= on_success`
    Gain,
    /// `value = on_success`
    Set,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericalUpdaterParameters {
    pub initial_value: f64,
    #[serde(default)]
    pub on_success: f64,
    #[serde(default)]
    pub on_failure: f64,
    pub minimum: f64,
    pub maximum: f64,
}

/// A value the task engine updates after every trial outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericalUpdater {
    pub operation: NumericalUpdaterOperation,
    pub parameters: NumericalUpdaterParameters,
}

impl NumericalUpdater {
    pub fn new(
        operation: NumericalUpdaterOperation,
        initial_value: f64,
        on_success: f64,
        minimum: f64,
        maximum: f64,
    ) -> Self {
        Self {
            operation,
            parameters: NumericalUpdaterParameters {
                initial_value,
                on_success,
                on_failure: 0.0,
                minimum,
                maximum,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovableSpoutControl {
    #[serde(default)]
    pub enabled: bool,
    pub time_to_collect_after_reward: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioControl {
    pub duration: f64,
    pub frequency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdorControl {
    pub valve_max_open_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionControl {
    pub frequency_filter_cutoff: f64,
    pub velocity_threshold: f64,
}

/// Hardware and rig behavior settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationControl {
    pub movable_spout_control: MovableSpoutControl,
    pub audio_control: AudioControl,
    pub odor_control: OdorControl,
    pub position_control: PositionControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockSamplingMode {
    #[default]
    Sequential,
    Random,
}

/// Ordered collection of environment blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStructure {
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub sampling_mode: BlockSamplingMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "condition_type")]
pub enum BlockEndCondition {
    PatchCount { value: Distribution },
    Duration { value: Distribution },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub environment_statistics: EnvironmentStatistics,
    #[serde(default)]
    pub end_conditions: Vec<BlockEndCondition>,
}

/// Patch sequence statistics of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentStatistics {
    pub patches: Vec<Patch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_state_occupancy: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_matrix: Option<Vec<Vec<f64>>>,
}

impl EnvironmentStatistics {
    /// Environment with uniform first-state and transition probabilities.
    pub fn uniform(patches: Vec<Patch>) -> Self {
        let n = patches.len();
        let p = if n > 0 { 1.0 / n as f64 } else { 0.0 };
        Self {
            first_state_occupancy: Some(vec![p; n]),
            transition_matrix: Some(vec![vec![p; n]; n]),
            patches,
        }
    }

    pub fn first_patch_mut(&mut self) -> Result<&mut Patch> {
        self.patches
            .first_mut()
            .ok_or_else(|| Error::structure("expected at least one patch in the default block"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdorSpecification {
    pub index: u32,
    pub concentration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "terminator_type")]
pub enum PatchTerminator {
    OnChoice { count: Distribution },
    OnRejection { count: Distribution },
    OnTime { count: Distribution },
}

/// One odor/reward configuration in the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub label: String,
    pub state_index: u32,
    pub odor_specification: OdorSpecification,
    pub reward_specification: RewardSpecification,
    pub patch_virtual_sites_generator: PatchVirtualSitesGenerator,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patch_terminators: Vec<PatchTerminator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VirtualSiteLabel {
    InterPatch,
    InterSite,
    RewardSite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSpecification {
    pub contrast: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreadmillSpecification {
    pub friction: Distribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualSiteGenerator {
    pub label: VirtualSiteLabel,
    pub render_specification: RenderSpecification,
    pub length_distribution: Distribution,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treadmill_specification: Option<TreadmillSpecification>,
}

/// Generators for the three kinds of virtual sites in a patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchVirtualSitesGenerator {
    pub inter_patch: VirtualSiteGenerator,
    pub inter_site: VirtualSiteGenerator,
    pub reward_site: VirtualSiteGenerator,
}
