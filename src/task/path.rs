//! Declared subtrees of the task-parameter tree
//!
//! Every policy names the subtrees it may write. Start policies of one stage
//! must not declare overlapping subtrees, so their relative order only
//! matters where the stage author made it matter explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A writable region of [`TaskParameters`](super::TaskParameters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPath {
    /// `task_parameters.updaters`
    Updaters,
    /// `task_parameters.operation_control`
    OperationControl,
    /// `environment.blocks[*].environment_statistics.patches[*].reward_specification`
    PatchRewardSpecification,
    /// `environment.blocks[*].environment_statistics.patches[*].patch_virtual_sites_generator`
    PatchVirtualSites,
    /// `task_parameters.environment`, including every patch
    Environment,
}

impl TaskPath {
    /// Whether writes to `self` and `other` can touch the same value.
    pub fn overlaps(self, other: TaskPath) -> bool {
        if self == other {
            return true;
        }
        matches!(
            (self, other),
            (Self::Environment, Self::PatchRewardSpecification | Self::PatchVirtualSites)
                | (Self::PatchRewardSpecification | Self::PatchVirtualSites, Self::Environment)
        )
    }
}

impl fmt::Display for TaskPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = match self {
            Self::Updaters => "task_parameters.updaters",
            Self::OperationControl => "task_parameters.operation_control",
            Self::PatchRewardSpecification => "patches[*].reward_specification",
            Self::PatchVirtualSites => "patches[*].patch_virtual_sites_generator",
            Self::Environment => "task_parameters.environment",
        };
        f.write_str(path)
    }
}
