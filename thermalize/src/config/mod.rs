//! Configuration management for thermalization runs
//!
//! This module handles the YAML configuration structures, their defaults,
//! and validation. Command-line arguments override file values.

mod args;

pub use args::Args;

use ising::Spin;
use serde::Deserialize;

pub const DEFAULT_WIDTH: usize = 5;
pub const DEFAULT_HEIGHT: usize = 5;
pub const DEFAULT_GROUND_STATE: Spin = Spin::Down;
pub const DEFAULT_BETA: f64 = 1.0;
pub const DEFAULT_PATIENCE: usize = 3;
pub const DEFAULT_MAX_STEPS: usize = 1_000_000;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lattice: LatticeParams,

    #[serde(default)]
    pub thermal: ThermalSection,

    /// Random seed (optional, entropy when absent)
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Lattice shape and starting state
#[derive(Debug, Clone, Deserialize)]
pub struct LatticeParams {
    #[serde(default)]
    pub width: Option<usize>,

    #[serde(default)]
    pub height: Option<usize>,

    /// Uniform starting spin, `up` or `down`
    #[serde(default)]
    pub ground_state: Option<Spin>,
}

impl Default for LatticeParams {
    fn default() -> Self {
        LatticeParams {
            width: Some(DEFAULT_WIDTH),
            height: Some(DEFAULT_HEIGHT),
            ground_state: Some(DEFAULT_GROUND_STATE),
        }
    }
}

impl LatticeParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.width.is_none() {
            self.width = defaults.width;
        }
        if self.height.is_none() {
            self.height = defaults.height;
        }
        if self.ground_state.is_none() {
            self.ground_state = defaults.ground_state;
        }
        self
    }
}

/// Thermalization parameters
#[derive(Debug, Clone, Deserialize)]
pub struct ThermalSection {
    #[serde(default)]
    pub beta: Option<f64>,

    #[serde(default)]
    pub patience: Option<usize>,

    #[serde(default)]
    pub max_steps: Option<usize>,

    /// Ignore `max_steps` and loop until convergence
    #[serde(default)]
    pub unbounded: Option<bool>,
}

impl Default for ThermalSection {
    fn default() -> Self {
        ThermalSection {
            beta: Some(DEFAULT_BETA),
            patience: Some(DEFAULT_PATIENCE),
            max_steps: Some(DEFAULT_MAX_STEPS),
            unbounded: Some(false),
        }
    }
}

impl ThermalSection {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.beta.is_none() {
            self.beta = defaults.beta;
        }
        if self.patience.is_none() {
            self.patience = defaults.patience;
        }
        if self.max_steps.is_none() {
            self.max_steps = defaults.max_steps;
        }
        if self.unbounded.is_none() {
            self.unbounded = defaults.unbounded;
        }
        self
    }
}

impl Config {
    /// Apply default values to all sections
    pub fn with_defaults(mut self) -> Self {
        self.lattice = self.lattice.with_defaults();
        self.thermal = self.thermal.with_defaults();
        self
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.lattice.width == Some(0) || self.lattice.height == Some(0) {
            return Err("Lattice width and height must be positive".to_string());
        }

        if let Some(beta) = self.thermal.beta {
            if !beta.is_finite() {
                return Err(format!("Inverse temperature must be finite, got {beta}"));
            }
        }

        if self.thermal.patience == Some(0) {
            return Err("Patience must be at least one step".to_string());
        }

        Ok(())
    }
}
