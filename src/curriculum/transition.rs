//! Stage transitions

use std::fmt;

/// Predicate deciding whether a transition fires.
///
/// Must be pure and total over the metrics: absent fields evaluate to
/// `false` rather than erroring.
pub type PredicateFn<M> = fn(&M) -> bool;

/// A named transition predicate.
pub struct StageTransition<M> {
    name: &'static str,
    predicate: PredicateFn<M>,
}

impl<M> StageTransition<M> {
    pub const fn new(name: &'static str, predicate: PredicateFn<M>) -> Self {
        Self { name, predicate }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fires(&self, metrics: &M) -> bool {
        (self.predicate)(metrics)
    }
}

impl<M> Clone for StageTransition<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for StageTransition<M> {}

impl<M> fmt::Debug for StageTransition<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StageTransition").field(&self.name).finish()
    }
}
