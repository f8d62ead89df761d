//! Policies: metric-gated task-parameter updates

use std::fmt;

use crate::error::Result;
use crate::task::{TaskLogic, TaskPath};

/// Signature of a policy body.
///
/// Receives an owned copy of the task logic and returns it, mutated or not.
/// A policy whose precondition fails must return its input unchanged.
pub type PolicyFn<M> = fn(&M, TaskLogic) -> Result<TaskLogic>;

/// A named policy and the task subtrees it may write.
pub struct Policy<M> {
    name: &'static str,
    touches: &'static [TaskPath],
    apply: PolicyFn<M>,
}

impl<M> Policy<M> {
    pub const fn new(name: &'static str, touches: &'static [TaskPath], apply: PolicyFn<M>) -> Self {
        Self { name, touches, apply }
    }

    /// Identifier persisted in trainer states.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn touches(&self) -> &'static [TaskPath] {
        self.touches
    }

    /// First subtree this policy shares with `other`, if any.
    pub fn conflict_with(&self, other: &Policy<M>) -> Option<TaskPath> {
        self.touches
            .iter()
            .copied()
            .find(|mine| other.touches.iter().any(|theirs| mine.overlaps(*theirs)))
    }

    pub fn apply(&self, metrics: &M, task: TaskLogic) -> Result<TaskLogic> {
        (self.apply)(metrics, task)
    }
}

impl<M> Clone for Policy<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Policy<M> {}

impl<M> PartialEq for Policy<M> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<M> fmt::Debug for Policy<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("name", &self.name)
            .field("touches", &self.touches)
            .finish()
    }
}
