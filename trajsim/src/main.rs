//! Entry point for the `trajsim` binary.

use anyhow::Result;
use trajsim::{init_tracing, run_simulation, SimulateArgs, SimulationConfig};

fn main() -> Result<()> {
    let args = SimulateArgs::parse_with_hr(std::env::args());
    init_tracing(args.verbose);
    let config = SimulationConfig::try_from(args)?;
    run_simulation(&config)?;
    Ok(())
}
