//! 2D Ising lattice thermalization
//!
//! A toroidal grid of ±1 spins, its doubled-bond interaction energy, and a
//! global single-flip sampler that evolves the grid until its energy stops
//! changing.

pub mod energy;
pub mod error;
pub mod lattice;
pub mod render;
pub mod rng;
pub mod sampler;
pub mod thermal;

pub use energy::{boltzmann_weight, energy, flip_delta};
pub use error::IsingError;
pub use lattice::{Lattice, Spin};
pub use render::render;
pub use rng::{seeded_rng, uniform};
pub use sampler::{select_site, FlipSampler};
pub use thermal::{
    evolve_into_thermal_state, ThermalParams, ThermalReport, ThermalStatus, Thermalizer,
};
