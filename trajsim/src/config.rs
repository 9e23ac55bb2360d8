//! Command-line arguments and the validated configs built from them.

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use render::VisualizerKind;
use rl::{Bounds, GridSpec, PolicyKind};
use std::path::{Path, PathBuf};

pub const POLICY_CONFIG_FILE: &str = "policy.config.json";
pub const POLICY_CHECKPOINT_FILE: &str = "policy.ckpt.json";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Default,
    Random,
}

impl From<PolicyArg> for PolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Default => PolicyKind::Default,
            PolicyArg::Random => PolicyKind::Random,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum VizArg {
    Generic,
    Navigation,
}

impl From<VizArg> for VisualizerKind {
    fn from(arg: VizArg) -> Self {
        match arg {
            VizArg::Generic => VisualizerKind::Generic,
            VizArg::Navigation => VisualizerKind::Navigation,
        }
    }
}

/// Run a policy against a domain and report reward and timing statistics.
#[derive(Parser, Debug)]
#[command(name = "trajsim", version)]
pub struct SimulateArgs {
    /// Domain file (JSON) or built-in id such as `Navigation-v2`.
    pub rddl: String,
    #[arg(long, value_enum, default_value_t = PolicyArg::Default)]
    pub policy: PolicyArg,
    #[arg(long, value_enum, default_value_t = VizArg::Generic)]
    pub viz: VizArg,
    /// Number of timesteps.
    #[arg(short = 'H', long, alias = "hr", default_value_t = 40)]
    pub horizon: usize,
    /// Number of trajectories simulated together.
    #[arg(short = 'b', long = "batch_size", alias = "batch-size", default_value_t = 75)]
    pub batch_size: usize,
    #[arg(short, long)]
    pub verbose: bool,
    /// Seeds both the model noise and the random policy.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Image written by the navigation visualizer.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl SimulateArgs {
    /// Parses `args` after rewriting the two-letter `-hr` horizon flag,
    /// which clap would otherwise read as `-h`.
    pub fn parse_with_hr<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::parse_from(rewrite_hr(args))
    }

    /// # Errors
    ///
    /// Unknown flags or invalid values, as reported by clap.
    pub fn try_parse_with_hr<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::try_parse_from(rewrite_hr(args))
    }
}

fn rewrite_hr<I, T>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut positional_only = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if positional_only {
                return arg;
            }
            if arg == "--" {
                positional_only = true;
                return arg;
            }
            match arg.strip_prefix("-hr") {
                Some("") => "--horizon".to_string(),
                Some(value) if value.starts_with('=') => format!("--horizon{value}"),
                _ => arg,
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub rddl: String,
    pub policy: PolicyKind,
    pub viz: VisualizerKind,
    pub horizon: usize,
    pub batch_size: usize,
    pub verbose: bool,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
}

impl TryFrom<SimulateArgs> for SimulationConfig {
    type Error = anyhow::Error;

    fn try_from(args: SimulateArgs) -> Result<Self> {
        if args.horizon == 0 {
            bail!("--horizon must be at least 1");
        }
        if args.batch_size == 0 {
            bail!("--batch_size must be at least 1");
        }
        Ok(Self {
            rddl: args.rddl,
            policy: args.policy.into(),
            viz: args.viz.into(),
            horizon: args.horizon,
            batch_size: args.batch_size,
            verbose: args.verbose,
            seed: args.seed,
            output: args.output,
        })
    }
}

/// Plot a trained policy's actions over a grid of navigation states.
#[derive(Parser, Debug)]
#[command(name = "plot_policy", version)]
pub struct PlotArgs {
    /// Domain file (JSON) or built-in id such as `Navigation-v2`.
    pub rddl: String,
    /// Directory holding `policy.config.json` and `policy.ckpt.json`.
    pub logdir: PathBuf,
    /// Output image; defaults to `<logdir>/policy_<timestamp>.png`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(
        short,
        long,
        num_args = 4,
        value_names = ["MIN_X", "MAX_X", "MIN_Y", "MAX_Y"],
        allow_negative_numbers = true,
        default_values_t = [-5.0, 11.0, -2.0, 11.0]
    )]
    pub size: Vec<f32>,
    /// Grid points per axis.
    #[arg(short, long, default_value_t = 20)]
    pub npoints: usize,
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlotConfig {
    pub rddl: String,
    pub policy_config: PathBuf,
    pub checkpoint: PathBuf,
    pub grid: GridSpec,
    pub output: PathBuf,
}

impl TryFrom<PlotArgs> for PlotConfig {
    type Error = anyhow::Error;

    fn try_from(args: PlotArgs) -> Result<Self> {
        let &[min_x, max_x, min_y, max_y] = args.size.as_slice() else {
            bail!("--size takes exactly four values, got {}", args.size.len());
        };
        let grid = GridSpec::new(Bounds::new(min_x, max_x, min_y, max_y)?, args.npoints)?;
        let output = args.output.unwrap_or_else(|| default_output(&args.logdir));
        Ok(Self {
            rddl: args.rddl,
            policy_config: args.logdir.join(POLICY_CONFIG_FILE),
            checkpoint: args.logdir.join(POLICY_CHECKPOINT_FILE),
            grid,
            output,
        })
    }
}

fn default_output(logdir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    logdir.join(format!("policy_{stamp}.png"))
}
