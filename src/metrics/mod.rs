//! Session metrics
//!
//! Metrics summarize one behavior session. They are built fresh from a
//! session directory on every evaluation and never mutated afterwards.
//!
//! When a datastream is missing, count-like aggregates default to zero while
//! duration and length fields default to `None`. Stage-transition predicates
//! read `None` as "not yet observed" and evaluate to `false`.

mod dataset;
mod depletion;
mod single_site;

#[cfg(test)]
mod tests;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::path::Path;

use crate::error::{Error, Result};

pub use dataset::{EventStream, SessionDataset, SoftwareEvent, SOFTWARE_EVENTS_DIR};
pub use depletion::{depletion_metrics_from_dataset, DepletionCurriculumMetrics};
pub use single_site::{single_site_metrics_from_dataset, SingleSiteMatchingMetrics};

/// A metrics record consumed by transitions and policies.
pub trait Metrics: Clone + Debug + PartialEq + Serialize + DeserializeOwned {
    /// Check value invariants that the field types cannot express.
    fn validate(&self) -> Result<()>;
}

/// Computes metrics from a session data directory.
pub type MetricsProvider<M> = fn(&Path) -> Result<M>;

pub(crate) fn ensure_non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidMetrics {
            field: field.to_string(),
            message: format!("must be a finite non-negative number, got {value}"),
        })
    }
}

pub(crate) fn ensure_non_negative_opt(field: &str, value: Option<f64>) -> Result<()> {
    value.map_or(Ok(()), |v| ensure_non_negative(field, v))
}
