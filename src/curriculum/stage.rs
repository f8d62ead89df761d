//! Curriculum stages

use std::fmt;
use std::path::Path;

use super::policy::Policy;
use crate::error::{Error, Result};
use crate::metrics::{Metrics, MetricsProvider};
use crate::task::TaskLogic;

/// A named task-logic template plus the policies applied while in it.
///
/// The template is never mutated; policies always start from a copy, so
/// re-entering a stage starts from the same baseline.
pub struct Stage<M> {
    name: String,
    task: TaskLogic,
    start_policies: Vec<Policy<M>>,
    metrics_provider: MetricsProvider<M>,
}

impl<M: Metrics> Stage<M> {
    /// Stage without start policies.
    pub fn new(name: impl Into<String>, task: TaskLogic, metrics_provider: MetricsProvider<M>) -> Self {
        Self {
            name: name.into(),
            task,
            start_policies: Vec::new(),
            metrics_provider,
        }
    }

    /// Set the ordered start policies.
    ///
    /// Rejects duplicate policy names and policies that declare overlapping
    /// task subtrees.
    pub fn with_start_policies(mut self, policies: Vec<Policy<M>>) -> Result<Self> {
        for (i, first) in policies.iter().enumerate() {
            for second in &policies[i + 1..] {
                if first.name() == second.name() {
                    return Err(Error::structure(format!(
                        "stage '{}' lists policy '{}' twice",
                        self.name,
                        first.name()
                    )));
                }
                if let Some(path) = first.conflict_with(second) {
                    return Err(Error::PolicyConflict {
                        stage: self.name.clone(),
                        first: first.name().to_string(),
                        second: second.name().to_string(),
                        path: path.to_string(),
                    });
                }
            }
        }
        self.start_policies = policies;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The immutable task-logic template.
    pub fn task(&self) -> &TaskLogic {
        &self.task
    }

    pub fn start_policies(&self) -> &[Policy<M>] {
        &self.start_policies
    }

    pub fn start_policy_names(&self) -> Vec<String> {
        self.start_policies.iter().map(|p| p.name().to_string()).collect()
    }

    /// Compute this stage's metrics for a session directory.
    pub fn metrics(&self, data_directory: &Path) -> Result<M> {
        (self.metrics_provider)(data_directory)
    }

    /// Fold `policies` over a fresh copy of the template, in order.
    pub fn apply_policies(&self, policies: &[Policy<M>], metrics: &M) -> Result<TaskLogic> {
        policies
            .iter()
            .try_fold(self.task.clone(), |task, policy| policy.apply(metrics, task))
    }

    /// Same name, template and start policies.
    pub(crate) fn same_definition(&self, other: &Stage<M>) -> bool {
        self.name == other.name
            && self.task == other.task
            && self.start_policies == other.start_policies
    }
}

impl<M> fmt::Debug for Stage<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("name", &self.name)
            .field("start_policies", &self.start_policies)
            .finish_non_exhaustive()
    }
}
