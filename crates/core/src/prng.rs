//! Deterministic PRNG and index-keyed noise.
//!
//! [`Xorshift64`] is a small seedable generator. [`Xorshift64::keyed`] derives
//! an independent stream from `(seed, index)` with a SplitMix64 mix, so a
//! point's noise depends only on its index and the caller's seed, never on
//! how many values were drawn before it.

use serde::{Deserialize, Serialize};

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed of 0 is replaced with
/// a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

/// SplitMix64 finalizer: a bijective avalanche mix of a 64-bit word.
pub fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Creates the generator for element `index` of a stream keyed by `seed`.
    ///
    /// Neighbouring indices get uncorrelated states because both the seed and
    /// the index pass through [`splitmix64`] before being combined.
    pub fn keyed(seed: u64, index: u64) -> Self {
        Self::new(splitmix64(splitmix64(seed) ^ index))
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns a uniformly distributed f64 in [0, 1) from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [-bound, bound).
    ///
    /// Scales a unit draw instead of spanning `2 * bound`, so the result is
    /// finite for every finite `bound`, including `f64::MAX`.
    pub fn next_symmetric(&mut self, bound: f64) -> f64 {
        bound * (2.0 * self.next_f64() - 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // If this breaks, every stored noise seed changes meaning.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_does_not_produce_all_zeros() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0, "seed=0 guard failed");
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn two_instances_with_same_seed_produce_identical_sequences() {
        let mut rng_a = Xorshift64::new(42);
        let mut rng_b = Xorshift64::new(42);
        for i in 0..1000 {
            assert_eq!(
                rng_a.next_u64(),
                rng_b.next_u64(),
                "sequences diverged at index {i}"
            );
        }
    }

    #[test]
    fn keyed_streams_are_reproducible() {
        let mut a = Xorshift64::keyed(7, 1234);
        let mut b = Xorshift64::keyed(7, 1234);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn keyed_streams_differ_across_indices_and_seeds() {
        let first = |seed, index| Xorshift64::keyed(seed, index).next_u64();
        assert_ne!(first(7, 0), first(7, 1));
        assert_ne!(first(7, 0), first(8, 0));
    }

    #[test]
    fn splitmix64_is_not_identity_on_zero() {
        assert_ne!(splitmix64(0), 0);
    }

    #[test]
    fn next_symmetric_with_zero_bound_returns_zero() {
        let mut rng = Xorshift64::new(5);
        assert_eq!(rng.next_symmetric(0.0), 0.0);
    }

    #[test]
    fn next_symmetric_stays_within_bounds() {
        let mut rng = Xorshift64::new(9999);
        for i in 0..10_000 {
            let v = rng.next_symmetric(0.5);
            assert!(
                (-0.5..0.5).contains(&v),
                "next_symmetric(0.5) = {v} out of bounds at iteration {i}"
            );
        }
    }

    #[test]
    fn next_symmetric_is_finite_for_largest_bound() {
        let mut rng = Xorshift64::keyed(7, 0);
        for _ in 0..1_000 {
            let v = rng.next_symmetric(f64::MAX);
            assert!(v.is_finite(), "draw {v} overflowed");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval_for_any_key(seed: u64, index: u64) {
                let mut rng = Xorshift64::keyed(seed, index);
                for _ in 0..32 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "next_f64() = {v}");
                }
            }

            #[test]
            fn next_f64_approximate_uniformity(seed: u64) {
                let mut buckets = [0u32; 10];
                for index in 0..10_000u64 {
                    let v = Xorshift64::keyed(seed, index).next_f64();
                    let idx = (v * 10.0).min(9.0) as usize;
                    buckets[idx] += 1;
                }
                // Loose bound (expected ~1000 per bucket).
                for (i, &count) in buckets.iter().enumerate() {
                    prop_assert!(count >= 500, "bucket {i} has only {count} values");
                }
            }
        }
    }
}
