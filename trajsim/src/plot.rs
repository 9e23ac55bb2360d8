//! The `plot_policy` run: restore a trained policy and plot it over a grid.

use crate::config::PlotConfig;
use anyhow::{Context, Result};
use domain::Domain;
use ml::{FeedforwardConfig, FeedforwardPolicy, Policy};
use model::{Model, NonFluents};
use render::{policy_figure, PolicyScene, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use rl::{action_space, evaluate};
use std::path::PathBuf;

/// Renders the policy field and streamline panels and returns the path of
/// the saved image.
///
/// # Errors
///
/// Fails if the domain cannot be loaded, the policy files in the log
/// directory are missing or do not match the domain, or the image cannot
/// be written.
pub fn run_policy_plot(config: &PlotConfig) -> Result<PathBuf> {
    let model = Domain::load(&config.rddl)?.into_model()?;
    let non_fluents = NonFluents::from_model(&model).context("domain has no navigation fluents")?;

    let ff_config = FeedforwardConfig::from_file(&config.policy_config)?;
    let mut policy = FeedforwardPolicy::new(ff_config, model.state_size(), action_space(&model));
    policy.build()?;
    policy
        .restore(&config.checkpoint)
        .with_context(|| format!("failed to restore {}", config.checkpoint.display()))?;

    let points = config.grid.sample();
    tracing::info!(points = points.len(), npoints = config.grid.npoints, "sampling policy");
    let field = evaluate(&mut policy, &points)?;

    let scene = PolicyScene { bounds: config.grid.bounds, non_fluents: &non_fluents, field: &field };
    let figure = policy_figure(&scene, DEFAULT_WIDTH, DEFAULT_HEIGHT)?;
    figure.save(&config.output)?;
    Ok(config.output.clone())
}
