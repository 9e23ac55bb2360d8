//! # trajsim
//!
//! Command-line front-ends over the workspace crates:
//!
//! -   `trajsim` rolls a policy out against a navigation domain for a
//!     fixed horizon over a batch of trajectories, then prints reward and
//!     timing statistics and hands the rollout to a visualizer.
//! -   `plot_policy` restores a trained feedforward policy from a log
//!     directory, evaluates it over a grid of states and plots the actions
//!     as arrows and as streamlines over the zones' potential field.
//!
//! The library crates are re-exported for convenience:
//!
//! -   [`ml`]: tensors, layers and policies.
//! -   [`model`]: the batched model interface and the navigation model.
//! -   [`domain`]: JSON and built-in domain descriptions.
//! -   [`rl`]: the simulator, statistics and grid sampling.
//! -   [`render`]: potential fields, policy plots and visualizers.

pub mod app;
pub mod config;
pub mod plot;

pub use app::{run_simulation, RunSummary};
pub use config::{PlotArgs, PlotConfig, SimulateArgs, SimulationConfig};
pub use plot::run_policy_plot;

pub use domain;
pub use ml;
pub use model;
pub use render;
pub use rl;

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber. `RUST_LOG` wins; otherwise `info`, or
/// `debug` when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .init();
}
