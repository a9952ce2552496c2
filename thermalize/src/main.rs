//! Ising lattice thermalization command-line interface
//!
//! Builds a uniform ground-state lattice, prints it with its energy, evolves it
//! into a thermal state and prints the result.

use color_eyre::eyre::Result;

mod app;
mod config;
mod io;

use app::ThermalizeApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    ThermalizeApplication::from_cli()?.run()
}
