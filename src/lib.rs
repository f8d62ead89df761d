//! VR foraging curricula
//!
//! Curricula describe how the task of a head-fixed mouse foraging in a
//! virtual corridor is made harder across sessions. A curriculum is a
//! directed graph of stages. Each stage carries a task-logic template and
//! a list of policies that adjust that template from the last session's
//! metrics; edges fire on predicates over those same metrics.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use vr_foraging_curricula::curricula::depletion;
//! use vr_foraging_curricula::curriculum::Trainer;
//!
//! let curriculum = depletion::curriculum()?;
//! let trainer = Trainer::new(&curriculum);
//! let state = trainer.create_enrollment()?;
//! let suggestion = trainer.suggest(&state, Path::new("session_001"))?;
//! println!("next stage: {}", suggestion.trainer_state.stage);
//! # Ok::<(), vr_foraging_curricula::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod curricula;
pub mod curriculum;
pub mod error;
pub mod metrics;
pub mod numeric;
pub mod task;

pub use error::{Error, Result};

/// Package version, stamped into every curriculum and suggestion.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
