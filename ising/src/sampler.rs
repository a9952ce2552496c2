use crate::energy::{energy, flip_delta};
use crate::error::IsingError;
use crate::lattice::Lattice;
use crate::rng::uniform;
use rand::Rng;
use tracing::trace;

/// Global single-flip sampler.
///
/// Every step considers all `N` configurations that differ from the current
/// one by a single flipped spin, weights each by `exp(-beta * E)` of that
/// whole configuration, and flips one site drawn from the normalized weights.
/// This is a categorical draw over sites, not a Metropolis accept/reject.
///
/// The weight buffer is scratch space reused between steps.
#[derive(Debug, Clone, Default)]
pub struct FlipSampler {
    weights: Vec<f64>,
}

impl FlipSampler {
    pub fn new(cells: usize) -> Self {
        Self {
            weights: vec![0.0; cells],
        }
    }

    /// Normalized probability of flipping each cell, in row-major order.
    ///
    /// Candidate energies come from [`flip_delta`] rather than flipping and
    /// recomputing, which gives the same integers in O(1) per site. Weights
    /// are shifted by the largest exponent before `exp`; the shift cancels
    /// in the normalization and keeps the weights from all underflowing to
    /// zero on large lattices.
    pub fn probabilities(&mut self, lattice: &Lattice, beta: f64) -> Result<&[f64], IsingError> {
        if self.weights.len() != lattice.len() {
            self.weights.resize(lattice.len(), 0.0);
        }

        let current = energy(lattice);
        let mut max_exponent = f64::NEG_INFINITY;
        for (weight, (x, y)) in self.weights.iter_mut().zip(lattice.sites()) {
            let candidate = current + flip_delta(lattice, x, y);
            *weight = -beta * candidate as f64;
            max_exponent = max_exponent.max(*weight);
        }

        let mut sum = 0.0;
        for weight in &mut self.weights {
            *weight = (*weight - max_exponent).exp();
            sum += *weight;
        }

        if !sum.is_finite() || sum <= 0.0 {
            return Err(IsingError::DegenerateWeights { sum });
        }

        for weight in &mut self.weights {
            *weight /= sum;
        }

        Ok(&self.weights)
    }

    /// Site that a draw `r` in `[0, 1)` selects. Does not touch the lattice.
    pub fn select(
        &mut self,
        lattice: &Lattice,
        beta: f64,
        r: f64,
    ) -> Result<(isize, isize), IsingError> {
        let probabilities = self.probabilities(lattice, beta)?;
        let index = select_site(probabilities, r).ok_or_else(|| IsingError::DegenerateWeights {
            sum: probabilities.iter().sum(),
        })?;
        Ok(lattice.coords(index))
    }

    /// Draw one site from `rng`, flip it and return its coordinates.
    ///
    /// On error the lattice is left unchanged.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        lattice: &mut Lattice,
        beta: f64,
        rng: &mut R,
    ) -> Result<(isize, isize), IsingError> {
        let r = uniform(rng);
        let (x, y) = self.select(lattice, beta, r)?;
        lattice.flip(x, y);
        trace!(x, y, r, "flipped spin");
        Ok((x, y))
    }
}

/// Inverse-CDF draw: the first index whose cumulative probability exceeds `r`.
///
/// If rounding keeps the cumulative sum at or below `r`, the last index with
/// a nonzero probability is returned instead. `None` only when every
/// probability is zero.
pub fn select_site(probabilities: &[f64], r: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    let mut last_nonzero = None;

    for (i, &p) in probabilities.iter().enumerate() {
        cumulative += p;
        if cumulative > r {
            return Some(i);
        }
        if p > 0.0 {
            last_nonzero = Some(i);
        }
    }

    last_nonzero
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::boltzmann_weight;
    use crate::lattice::Spin;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn random_lattice(width: usize, height: usize, seed: u64) -> Lattice {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut lattice = Lattice::new(width, height).unwrap();
        for (x, y) in lattice.sites().collect::<Vec<_>>() {
            if rng.gen_bool(0.5) {
                lattice.set(x, y, Spin::Down);
            }
        }
        lattice
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let mut sampler = FlipSampler::default();
        for (seed, beta) in [(1, 1.0), (2, 0.1), (3, 0.0), (4, -0.5), (5, 3.0)] {
            let lattice = random_lattice(5, 4, seed);
            let probabilities = sampler.probabilities(&lattice, beta).unwrap();
            assert_eq!(probabilities.len(), 20);
            assert_relative_eq!(probabilities.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
            assert!(probabilities.iter().all(|&p| (0.0..=1.0).contains(&p)));
        }
    }

    #[test]
    fn test_probabilities_match_boltzmann_weights() {
        let lattice = random_lattice(3, 3, 9);
        let beta = 0.3;

        let weights: Vec<f64> = lattice
            .sites()
            .map(|(x, y)| {
                let mut flipped = lattice.clone();
                flipped.flip(x, y);
                boltzmann_weight(&flipped, beta)
            })
            .collect();
        let total: f64 = weights.iter().sum();

        let mut sampler = FlipSampler::new(lattice.len());
        let probabilities = sampler.probabilities(&lattice, beta).unwrap();
        for (p, w) in probabilities.iter().zip(&weights) {
            assert_relative_eq!(*p, w / total, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_uniform_lattice_gives_uniform_distribution() {
        let mut lattice = Lattice::new(2, 2).unwrap();
        lattice.fill(Spin::Down);
        let mut sampler = FlipSampler::new(4);

        for &p in sampler.probabilities(&lattice, 1.0).unwrap() {
            assert_relative_eq!(p, 0.25, epsilon = 1e-12);
        }
        assert_eq!(sampler.select(&lattice, 1.0, 0.0).unwrap(), (0, 0));
        assert_eq!(sampler.select(&lattice, 1.0, 0.6).unwrap(), (0, 1));
        assert_eq!(sampler.select(&lattice, 1.0, 0.99).unwrap(), (1, 1));
    }

    #[test]
    fn test_lower_energy_candidates_dominate() {
        let mut lattice = Lattice::new(4, 4).unwrap();
        lattice.flip(0, 0);
        let mut sampler = FlipSampler::new(16);
        let probabilities = sampler.probabilities(&lattice, 1.0).unwrap();

        // Flipping (0, 0) back raises the energy by 16; flipping any site away
        // from it lowers the energy by 16.
        assert!(probabilities[lattice.index(0, 0)] < 1e-10);
        assert!(probabilities[lattice.index(1, 0)] < 1e-3);
        assert!(probabilities[lattice.index(2, 2)] > 0.09);
    }

    #[test]
    fn test_selection_is_deterministic_for_fixed_draw() {
        let lattice = random_lattice(5, 5, 21);
        let before = lattice.clone();
        let mut first = FlipSampler::new(25);
        let mut second = FlipSampler::new(25);

        for r in [0.0, 0.13, 0.5, 0.87, 0.999] {
            let a = first.select(&lattice, 1.0, r).unwrap();
            let b = second.select(&lattice, 1.0, r).unwrap();
            assert_eq!(a, b);
            assert_eq!(first.select(&lattice, 1.0, r).unwrap(), a);
        }
        assert_eq!(lattice, before);
    }

    #[test]
    fn test_step_flips_exactly_one_spin() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut lattice = random_lattice(5, 5, 17);
        let mut sampler = FlipSampler::new(lattice.len());

        for _ in 0..20 {
            let before = lattice.clone();
            let (x, y) = sampler.step(&mut lattice, 1.0, &mut rng).unwrap();
            let changed: Vec<usize> = (0..lattice.len())
                .filter(|&i| lattice.spins()[i] != before.spins()[i])
                .collect();
            assert_eq!(changed, vec![lattice.index(x, y)]);
        }
    }

    #[test]
    fn test_large_lattice_does_not_underflow() {
        let lattice = Lattice::new(30, 30).unwrap();
        let mut flipped = lattice.clone();
        flipped.flip(0, 0);
        assert_eq!(boltzmann_weight(&flipped, 1.0), 0.0);

        let mut sampler = FlipSampler::new(lattice.len());
        let probabilities = sampler.probabilities(&lattice, 1.0).unwrap();
        assert_relative_eq!(probabilities.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_nan_beta_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut lattice = random_lattice(3, 3, 2);
        let before = lattice.clone();
        let mut sampler = FlipSampler::new(9);

        let result = sampler.step(&mut lattice, f64::NAN, &mut rng);
        assert!(matches!(result, Err(IsingError::DegenerateWeights { .. })));
        assert_eq!(lattice, before);
    }

    #[test]
    fn test_buffer_resizes_to_lattice() {
        let mut sampler = FlipSampler::new(4);
        let lattice = Lattice::new(3, 3).unwrap();
        assert_eq!(sampler.probabilities(&lattice, 0.5).unwrap().len(), 9);
    }

    #[test]
    fn test_select_site_inverse_cdf() {
        let probabilities = [0.1, 0.2, 0.3, 0.4];
        assert_eq!(select_site(&probabilities, 0.0), Some(0));
        assert_eq!(select_site(&probabilities, 0.1), Some(1));
        assert_eq!(select_site(&probabilities, 0.35), Some(2));
        assert_eq!(select_site(&probabilities, 0.95), Some(3));
    }

    #[test]
    fn test_select_site_rounding_fallback() {
        // Cumulative sum stops short of the draw
        assert_eq!(select_site(&[0.3, 0.3, 0.3], 0.95), Some(2));
        // Trailing zero-probability cells are never chosen
        assert_eq!(select_site(&[0.4, 0.4, 0.0], 0.9), Some(1));
        assert_eq!(select_site(&[0.0, 0.0], 0.5), None);
    }
}
