//! Batched rollouts and the reductions built on them.
//!
//! [`Simulator`] runs a [`ml::Policy`] against a [`model::Model`] for a
//! fixed horizon over a whole batch of trajectories and returns a
//! [`TrajectoryBundle`]; [`PerformanceStats`] and [`TimingStats`] reduce a
//! rollout to the numbers the CLI reports. [`GridSpec`] and [`evaluate`]
//! sample a policy over a 2-D state grid for plotting.

pub mod error;
pub mod field;
pub mod grid;
pub mod policies;
pub mod simulator;
pub mod stats;
pub mod trajectory;

pub use error::RolloutError;
pub use field::{evaluate, FieldError, FieldGrid, FieldSample, FieldSamples};
pub use grid::{check_square, linspace, Bounds, GridError, GridSamplePoints, GridSpec};
pub use policies::{action_space, PolicyKind};
pub use simulator::Simulator;
pub use stats::{report_performance_stats, report_time_stats, PerformanceStats, TimingStats};
pub use trajectory::TrajectoryBundle;
