//! Entry point for the `plot_policy` binary.

use anyhow::Result;
use clap::Parser;
use trajsim::{init_tracing, run_policy_plot, PlotArgs, PlotConfig};

fn main() -> Result<()> {
    let args = PlotArgs::parse();
    init_tracing(args.verbose);
    let config = PlotConfig::try_from(args)?;
    let output = run_policy_plot(&config)?;
    println!("saved {}", output.display());
    Ok(())
}
