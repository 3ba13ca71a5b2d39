//! Gauss - Linear System Solver
//!
//! Solves a square linear system by Gaussian elimination and prints every
//! reduction step, the solution and its residuals.
//!
//! # Usage
//!
//! ```bash
//! gauss system.txt
//! RUST_LOG=debug gauss --quiet
//! ```

use std::io;
use std::path::PathBuf;

use clap::Parser;
use gauss_solver::{
    error::Result,
    input,
    report,
    system::{DEFAULT_PIVOT_TOLERANCE, SolverConfig},
    LinearSystem,
};

/// Gaussian elimination linear system solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the system description file (built-in sample when omitted)
    #[arg(value_name = "SYSTEM_FILE")]
    system_file: Option<PathBuf>,

    /// Only print the initial system, solution and error (steps go to the debug log)
    #[arg(short, long)]
    quiet: bool,

    /// Pivots with magnitude at or below this value are treated as zero
    #[arg(long, default_value_t = DEFAULT_PIVOT_TOLERANCE)]
    pivot_tolerance: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Load the equations
    let equations = match &args.system_file {
        Some(path) => input::parse_file(path)?,
        None => input::sample_equations(),
    };

    // Build the system
    let config = SolverConfig::new().with_pivot_tolerance(args.pivot_tolerance);
    let mut system = LinearSystem::from_equations_with_config(equations, config);

    // Solve and report
    report::run(&mut system, !args.quiet, io::stdout().lock())?;

    Ok(())
}
