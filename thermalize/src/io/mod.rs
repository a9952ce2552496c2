//! Input/Output operations for thermalization runs
//!
//! This module handles logging setup and printing lattices.

mod output;

pub use output::{print_lattice, setup_output};
