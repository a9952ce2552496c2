//! Command-line argument parsing for thermalization runs

use clap::Parser;
use ising::Spin;

/// Evolve a 2D Ising lattice into a thermal state
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a YAML configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    pub config_file: Option<String>,

    /// Override lattice width
    #[arg(long)]
    pub width: Option<usize>,

    /// Override lattice height
    #[arg(long)]
    pub height: Option<usize>,

    /// Override the uniform starting spin (up or down)
    #[arg(long)]
    pub ground_state: Option<Spin>,

    /// Override inverse temperature
    #[arg(long, allow_negative_numbers = true)]
    pub beta: Option<f64>,

    /// Override number of consecutive unchanged-energy steps required
    #[arg(long)]
    pub patience: Option<usize>,

    /// Override the step cap
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Run until convergence with no step cap
    #[arg(long, conflicts_with = "max_steps")]
    pub unbounded: bool,

    /// Seed for a reproducible run (system entropy otherwise)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the log to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}
