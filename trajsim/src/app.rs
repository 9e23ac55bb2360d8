//! The `trajsim` run: build the model and policy, roll out, report.

use crate::config::SimulationConfig;
use anyhow::{Context, Result};
use domain::Domain;
use model::Model;
use rl::{report_performance_stats, report_time_stats, PerformanceStats, Simulator, TimingStats};
use std::time::Instant;

/// What one simulation run printed.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub performance: PerformanceStats,
    pub timing: TimingStats,
}

/// Simulates `batch_size` trajectories for `horizon` steps, prints the
/// performance and time reports and hands the rollout to the visualizer.
///
/// # Errors
///
/// Unknown domains, invalid domain parameters and any model, policy or
/// visualizer failure abort the run.
pub fn run_simulation(config: &SimulationConfig) -> Result<RunSummary> {
    let model = Domain::load(&config.rddl)?.with_seed(config.seed).into_model()?;
    tracing::info!(
        domain = model.name(),
        policy = config.policy.name(),
        horizon = config.horizon,
        batch_size = config.batch_size,
        "simulating"
    );

    let policy = config.policy.build(&model, config.batch_size, config.seed);
    let mut visualizer = config
        .viz
        .build(&model, config.verbose, config.output.clone())
        .context("failed to set up visualizer")?;

    let mut simulator = Simulator::new(model, policy, config.batch_size)?;
    let start = Instant::now();
    let bundle = simulator.run(config.horizon).context("rollout failed")?;
    let uptime = start.elapsed().as_secs_f64();

    let performance = report_performance_stats(&bundle)?;
    let timing = report_time_stats(uptime, config.horizon, config.batch_size)?;

    visualizer.render(&bundle).with_context(|| format!("{} visualizer failed", visualizer.name()))?;
    Ok(RunSummary { performance, timing })
}
