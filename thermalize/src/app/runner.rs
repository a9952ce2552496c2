use crate::config::{
    Args, Config, DEFAULT_BETA, DEFAULT_GROUND_STATE, DEFAULT_HEIGHT, DEFAULT_MAX_STEPS,
    DEFAULT_PATIENCE, DEFAULT_WIDTH,
};
use color_eyre::eyre::{Result, WrapErr};
use ising::{seeded_rng, Lattice, Spin, ThermalParams, ThermalReport, Thermalizer};
use tracing::info;

/// Fully resolved parameters of one run, command line over configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub width: usize,
    pub height: usize,
    pub ground_state: Spin,
    pub params: ThermalParams,
    pub seed: Option<u64>,
}

impl RunSettings {
    pub fn resolve(args: &Args, config: &Config) -> Self {
        let unbounded = args.unbounded || config.thermal.unbounded.unwrap_or(false);
        let max_steps = if unbounded {
            None
        } else {
            Some(
                args.max_steps
                    .or(config.thermal.max_steps)
                    .unwrap_or(DEFAULT_MAX_STEPS),
            )
        };

        RunSettings {
            width: args.width.or(config.lattice.width).unwrap_or(DEFAULT_WIDTH),
            height: args.height.or(config.lattice.height).unwrap_or(DEFAULT_HEIGHT),
            ground_state: args
                .ground_state
                .or(config.lattice.ground_state)
                .unwrap_or(DEFAULT_GROUND_STATE),
            params: ThermalParams {
                beta: args.beta.or(config.thermal.beta).unwrap_or(DEFAULT_BETA),
                patience: args
                    .patience
                    .or(config.thermal.patience)
                    .unwrap_or(DEFAULT_PATIENCE),
                max_steps,
            },
            seed: args.seed.or(config.seed),
        }
    }

    /// Check the merged values, command-line overrides included
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "Lattice width and height must be positive, got {}x{}",
                self.width, self.height
            ));
        }

        if !self.params.beta.is_finite() {
            return Err(format!(
                "Inverse temperature must be finite, got {}",
                self.params.beta
            ));
        }

        if self.params.patience == 0 {
            return Err("Patience must be at least one step".to_string());
        }

        Ok(())
    }
}

/// Allocate the lattice and fill it with the uniform ground state
pub fn build_lattice(settings: &RunSettings) -> Result<Lattice> {
    let mut lattice = Lattice::new(settings.width, settings.height)
        .wrap_err("Failed to allocate lattice")?;
    lattice.fill(settings.ground_state);
    Ok(lattice)
}

/// Evolve `lattice` into a thermal state
pub fn thermalize(lattice: &mut Lattice, settings: &RunSettings) -> Result<ThermalReport> {
    let mut thermalizer =
        Thermalizer::new(settings.params).wrap_err("Invalid thermalization parameters")?;
    let mut rng = seeded_rng(settings.seed);

    match settings.seed {
        Some(seed) => info!("Using random seed {}", seed),
        None => info!("Seeding from system entropy"),
    }
    info!(
        "Thermalizing at beta={} with patience={}",
        settings.params.beta, settings.params.patience
    );

    thermalizer
        .run(lattice, &mut rng)
        .wrap_err("Thermalization failed")
}
