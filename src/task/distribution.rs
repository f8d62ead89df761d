//! Probability distributions used by task parameters

use serde::{Deserialize, Serialize};

/// Bounds applied to samples of a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TruncationParameters {
    pub min: f64,
    pub max: f64,
    #[serde(default = "default_true")]
    pub is_truncated: bool,
}

impl TruncationParameters {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max, is_truncated: true }
    }
}

/// Affine transform applied to samples of a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingParameters {
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub offset: f64,
}

impl Default for ScalingParameters {
    fn default() -> Self {
        Self { scale: 1.0, offset: 0.0 }
    }
}

/// A sampled or constant numeric quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family")]
pub enum Distribution {
    Scalar {
        value: f64,
    },
    Exponential {
        rate: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        truncation_parameters: Option<TruncationParameters>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scaling_parameters: Option<ScalingParameters>,
    },
    Normal {
        mean: f64,
        std: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        truncation_parameters: Option<TruncationParameters>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scaling_parameters: Option<ScalingParameters>,
    },
    Uniform {
        min: f64,
        max: f64,
    },
    Binomial {
        n: u32,
        p: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        truncation_parameters: Option<TruncationParameters>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scaling_parameters: Option<ScalingParameters>,
    },
}

impl Distribution {
    /// A constant value.
    pub fn scalar(value: f64) -> Self {
        Self::Scalar { value }
    }

    /// Exponential distribution truncated to `[min, max]`.
    pub fn exponential(rate: f64, min: f64, max: f64) -> Self {
        Self::Exponential {
            rate,
            truncation_parameters: Some(TruncationParameters::new(min, max)),
            scaling_parameters: None,
        }
    }

    /// Normal distribution truncated to `[min, max]`.
    pub fn normal(mean: f64, std: f64, min: f64, max: f64) -> Self {
        Self::Normal {
            mean,
            std,
            truncation_parameters: Some(TruncationParameters::new(min, max)),
            scaling_parameters: Some(ScalingParameters::default()),
        }
    }

    pub fn uniform(min: f64, max: f64) -> Self {
        Self::Uniform { min, max }
    }

    /// Short family name, used in error messages.
    pub fn family(&self) -> &'static str {
        match self {
            Self::Scalar { .. } => "Scalar",
            Self::Exponential { .. } => "Exponential",
            Self::Normal { .. } => "Normal",
            Self::Uniform { .. } => "Uniform",
            Self::Binomial { .. } => "Binomial",
        }
    }

    /// The constant value, if this is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar { value } => Some(*value),
            _ => None,
        }
    }

    /// Mutable truncation bounds, if the family carries them.
    pub fn truncation_mut(&mut self) -> Option<&mut TruncationParameters> {
        match self {
            Self::Exponential { truncation_parameters, .. }
            | Self::Normal { truncation_parameters, .. }
            | Self::Binomial { truncation_parameters, .. } => truncation_parameters.as_mut(),
            Self::Scalar { .. } | Self::Uniform { .. } => None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_scale() -> f64 {
    1.0
}
