//! Curriculum engine
//!
//! A curriculum is a finite-state machine over [`Stage`]s. Each stage owns
//! an immutable task-logic template and an ordered list of start
//! [`Policy`]s. After every session a [`Trainer`] folds the active policies
//! over a copy of the template and steps the machine along the first
//! [`StageTransition`] whose predicate holds.
//!
//! Evaluation keeps no state beyond the persisted [`TrainerState`], so a
//! subject may regress and re-progress through cycles freely.

mod graph;
mod policy;
mod stage;
mod state;
mod suggestion;
mod trainer;
mod transition;

#[cfg(test)]
mod proptests;

pub use graph::Curriculum;
pub use policy::{Policy, PolicyFn};
pub use stage::Stage;
pub use state::{CurriculumId, TrainerState};
pub use suggestion::CurriculumSuggestion;
pub use trainer::Trainer;
pub use transition::{PredicateFn, StageTransition};

/// Version of the trainer-state and suggestion schema.
pub const DSL_VERSION: &str = "1.0.0";
