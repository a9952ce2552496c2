use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator for a thermalization run: reproducible with a seed, from system
/// entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// One uniform draw in `[0, 1)`.
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = seeded_rng(Some(1234));
        let mut b = seeded_rng(Some(1234));
        for _ in 0..100 {
            assert_eq!(uniform(&mut a), uniform(&mut b));
        }
    }

    #[test]
    fn test_uniform_range() {
        let mut rng = seeded_rng(None);
        for _ in 0..1000 {
            let r = uniform(&mut rng);
            assert!((0.0..1.0).contains(&r));
        }
    }
}
