//! Numeric helpers shared by policies and stage builders
//!
//! - Two-sided clamping for policy updates
//! - Continuous-time Markov chain replenishment matrices

mod clamp;
mod replenishment;

#[cfg(test)]
mod proptests;

pub use clamp::clamp;
pub use replenishment::{
    rate_from_transition_matrix, replenishment_transition_matrix, to_nested, DEFAULT_DT,
    DEFAULT_TIME_CONSTANT,
};
