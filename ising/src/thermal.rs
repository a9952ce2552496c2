use crate::energy::energy;
use crate::error::IsingError;
use crate::lattice::Lattice;
use crate::sampler::FlipSampler;
use rand::Rng;
use serde::Deserialize;
use std::collections::VecDeque;
use tracing::debug;

/// Parameters of a thermalization run
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ThermalParams {
    /// Inverse temperature. Not validated: `beta <= 0` is accepted.
    pub beta: f64,
    /// Consecutive energy-unchanged steps required to declare convergence
    pub patience: usize,
    /// Hard cap on sampler steps; `None` loops until convergence
    #[serde(default)]
    pub max_steps: Option<usize>,
}

impl Default for ThermalParams {
    fn default() -> Self {
        ThermalParams {
            beta: 1.0,
            patience: 3,
            max_steps: None,
        }
    }
}

impl ThermalParams {
    pub fn new(beta: f64, patience: usize) -> Self {
        Self {
            beta,
            patience,
            max_steps: None,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn validate(&self) -> Result<(), IsingError> {
        if self.patience == 0 {
            return Err(IsingError::InvalidPatience);
        }
        Ok(())
    }
}

/// Terminal state of a thermalization run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThermalStatus {
    /// Energy stayed unchanged for `patience` consecutive steps
    Converged,
    /// `max_steps` ran out first
    StepLimitReached,
}

/// Outcome of [`Thermalizer::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalReport {
    pub status: ThermalStatus,
    pub steps: usize,
    pub initial_energy: i64,
    pub final_energy: i64,
    /// The last `patience + 1` energies, oldest first, starting energy
    /// included while fewer steps than that have run. All equal on
    /// convergence.
    pub recent_energies: Vec<i64>,
}

impl ThermalReport {
    pub fn converged(&self) -> bool {
        self.status == ThermalStatus::Converged
    }
}

/// Repeats [`FlipSampler`] steps until the total energy stops changing.
#[derive(Debug, Clone)]
pub struct Thermalizer {
    params: ThermalParams,
    sampler: FlipSampler,
}

impl Thermalizer {
    pub fn new(params: ThermalParams) -> Result<Self, IsingError> {
        params.validate()?;
        Ok(Self {
            params,
            sampler: FlipSampler::default(),
        })
    }

    /// Evolve `lattice` in place until it is thermalized or the step cap is hit.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        lattice: &mut Lattice,
        rng: &mut R,
    ) -> Result<ThermalReport, IsingError> {
        let initial_energy = energy(lattice);
        let window = self.params.patience + 1;
        let mut recent = VecDeque::with_capacity(window);
        recent.push_back(initial_energy);
        let mut previous = initial_energy;
        let mut unchanged = 0;
        let mut steps = 0;

        let status = loop {
            if self.params.max_steps.is_some_and(|limit| steps >= limit) {
                break ThermalStatus::StepLimitReached;
            }

            self.sampler.step(lattice, self.params.beta, rng)?;
            steps += 1;

            let current = energy(lattice);
            if recent.len() == window {
                recent.pop_front();
            }
            recent.push_back(current);
            if current == previous {
                unchanged += 1;
            } else {
                unchanged = 0;
            }
            previous = current;

            if unchanged >= self.params.patience {
                break ThermalStatus::Converged;
            }
        };

        debug!(
            ?status,
            steps,
            initial_energy,
            final_energy = previous,
            "thermalization finished"
        );

        Ok(ThermalReport {
            status,
            steps,
            initial_energy,
            final_energy: previous,
            recent_energies: recent.into(),
        })
    }
}

/// Thermalize `lattice` at `beta` with no step cap.
///
/// Some lattices never settle (even-sided squares oscillate between perfect
/// antiferromagnetic order and one flip above it), so this can loop forever;
/// use a [`Thermalizer`] with `max_steps` when that matters.
pub fn evolve_into_thermal_state<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    beta: f64,
    patience: usize,
    rng: &mut R,
) -> Result<ThermalReport, IsingError> {
    Thermalizer::new(ThermalParams::new(beta, patience))?.run(lattice, rng)
}
