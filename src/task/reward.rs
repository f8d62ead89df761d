//! Reward specifications and reward-probability functions

use serde::{Deserialize, Serialize};

use super::distribution::Distribution;

/// When a reward function is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardFunctionRule {
    OnReward,
    OnChoice,
    OnRejection,
    OnTime,
    OnDistance,
    OnPatchEntry,
}

/// How a reward function updates the patch reward probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "function_type")]
pub enum ProbabilityFunction {
    /// Replace the probability with a sampled value.
    SetValueFunction { value: Distribution },
    /// Multiply the probability by `rate`, clamped to `[minimum, maximum]`.
    ClampedMultiplicativeRateFunction {
        minimum: f64,
        maximum: f64,
        rate: Distribution,
    },
    /// Continuous-time chain over discrete probability states.
    CtcmFunction {
        transition_matrix: Vec<Vec<f64>>,
        minimum: f64,
        maximum: f64,
        rho: f64,
    },
}

/// A rule that updates the reward state of a patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "function_type")]
pub enum RewardFunction {
    /// Applied while the animal is inside the patch.
    PatchRewardFunction {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        probability: Option<ProbabilityFunction>,
        rule: RewardFunctionRule,
    },
    /// Applied while the animal is outside the patch (replenishment).
    OutsideRewardFunction {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        probability: Option<ProbabilityFunction>,
        #[serde(default)]
        delay: f64,
        rule: RewardFunctionRule,
    },
    /// Applied regardless of the animal's location.
    PersistentRewardFunction {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        probability: Option<ProbabilityFunction>,
        rule: RewardFunctionRule,
    },
}

impl RewardFunction {
    pub fn probability(&self) -> Option<&ProbabilityFunction> {
        match self {
            Self::PatchRewardFunction { probability, .. }
            | Self::OutsideRewardFunction { probability, .. }
            | Self::PersistentRewardFunction { probability, .. } => probability.as_ref(),
        }
    }

    pub fn probability_mut(&mut self) -> &mut Option<ProbabilityFunction> {
        match self {
            Self::PatchRewardFunction { probability, .. }
            | Self::OutsideRewardFunction { probability, .. }
            | Self::PersistentRewardFunction { probability, .. } => probability,
        }
    }
}

/// Operant contingencies of a reward site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperantLogic {
    pub is_operant: bool,
    pub stop_duration: Distribution,
    pub time_to_collect_reward: f64,
    pub grace_distance_threshold: f64,
}

/// Reward parameters of a patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardSpecification {
    pub amount: Distribution,
    pub probability: Distribution,
    pub available: Distribution,
    #[serde(default = "default_delay")]
    pub delay: Distribution,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operant_logic: Option<OperantLogic>,
    #[serde(default)]
    pub reward_function: Vec<RewardFunction>,
}

fn default_delay() -> Distribution {
    Distribution::scalar(0.0)
}
