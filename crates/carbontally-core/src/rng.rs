//! Deterministic random source for synthetic data.
//!
//! Wraps `ChaCha8Rng` for cross-platform deterministic randomness. Every
//! fabricated consumption value and trend variation is drawn from the
//! `SynthRng` owned by the ingestion context, so identical seeds produce
//! identical output.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable random source behind all synthetic draws.
///
/// Implements `RngCore` by delegation, so call sites use the standard
/// `rand::Rng` extension methods (`gen_range` etc.) directly on it.
pub struct SynthRng(ChaCha8Rng);

impl SynthRng {
    /// Create a generator seeded from the given value.
    ///
    /// Two generators built from the same seed draw identical sequences.
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a generator seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }
}

impl RngCore for SynthRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_is_deterministic() {
        let mut a = SynthRng::from_seed(12345);
        let mut b = SynthRng::from_seed(12345);
        let vals_a: Vec<f64> = (0..20).map(|_| a.gen_range(0.0..100000.0)).collect();
        let vals_b: Vec<f64> = (0..20).map(|_| b.gen_range(0.0..100000.0)).collect();
        assert_eq!(vals_a, vals_b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = SynthRng::from_seed(1);
        let mut b = SynthRng::from_seed(2);
        let vals_a: Vec<f64> = (0..10).map(|_| a.gen::<f64>()).collect();
        let vals_b: Vec<f64> = (0..10).map(|_| b.gen::<f64>()).collect();
        assert_ne!(vals_a, vals_b);
    }

    #[test]
    fn test_gen_range_bounds() {
        let mut rng = SynthRng::from_seed(7);
        for _ in 0..1000 {
            let v = rng.gen_range(1500..3500);
            assert!((1500..3500).contains(&v));
        }
    }
}
