//! Task logic for the VR foraging task
//!
//! A tagged-variant tree of task parameters. Stages own one tree as an
//! immutable template; policies receive owned copies and return them
//! mutated.

pub mod builders;
mod distribution;
mod parameters;
mod path;
mod reward;


pub use distribution::{Distribution, ScalingParameters, TruncationParameters};
pub use parameters::{
    AudioControl, Block, BlockEndCondition, BlockSamplingMode, BlockStructure,
    EnvironmentStatistics, MovableSpoutControl, NumericalUpdater, NumericalUpdaterOperation,
    NumericalUpdaterParameters, OdorControl, OdorSpecification, OperationControl, Patch,
    PatchTerminator, PatchVirtualSitesGenerator, PositionControl, RenderSpecification,
    TaskLogic, TaskParameters, TreadmillSpecification, UpdaterTarget, VirtualSiteGenerator,
    VirtualSiteLabel,
};
pub use path::TaskPath;
pub use reward::{
    OperantLogic, ProbabilityFunction, RewardFunction, RewardFunctionRule, RewardSpecification,
};
