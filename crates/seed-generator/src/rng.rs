//! Deterministic random source shared by every generator.
//!
//! All randomness in a generation session flows through one [`SeedRng`]
//! owned by the `RecordCreator`. Helpers borrow it mutably and never clone
//! it, so a session is a pure function of its seed and call order.

use crate::error::ArgumentError;
use rand::distr::uniform::SampleUniform;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Seeded random number generator, wrapping `rand::rngs::StdRng`.
#[derive(Debug)]
pub struct SeedRng {
    seed: Option<u64>,
    rng: StdRng,
}

impl SeedRng {
    /// Create a generator from `seed`, or from OS entropy when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { seed, rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// The seed this generator was created with, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Uniform integer in `[0, n)`. Returns 0 when `n` is 0.
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.random_range(0..n)
    }

    /// Uniform float in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform value in `[lo, hi]`. Returns `lo` when the range is empty.
    pub fn range_inclusive<T>(&mut self, lo: T, hi: T) -> T
    where
        T: SampleUniform + PartialOrd + Copy,
    {
        if hi < lo {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }

    /// `true` with probability `p` (clamped to `[0, 1]`).
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p.clamp(0.0, 1.0))
    }

    /// Pick one element uniformly.
    pub fn sample<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, ArgumentError> {
        if items.is_empty() {
            return Err(ArgumentError::EmptyCollection("sample input".to_string()));
        }
        let index = self.below(items.len());
        Ok(&items[index])
    }

    /// Shuffled copy of `items`; the input is left untouched.
    pub fn shuffled<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut copy = items.to_vec();
        self.shuffle(&mut copy);
        copy
    }

    /// Shuffle `items` in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Remove and return a uniformly chosen element.
    pub fn pop_random<T>(&mut self, items: &mut Vec<T>) -> Result<T, ArgumentError> {
        if items.is_empty() {
            return Err(ArgumentError::EmptyCollection("pop input".to_string()));
        }
        let index = self.below(items.len());
        Ok(items.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut rng1 = SeedRng::seeded(42);
        let mut rng2 = SeedRng::seeded(42);

        for _ in 0..50 {
            assert_eq!(rng1.below(1000), rng2.below(1000));
            assert_eq!(rng1.unit().to_bits(), rng2.unit().to_bits());
        }

        let items: Vec<u32> = (0..20).collect();
        assert_eq!(rng1.shuffled(&items), rng2.shuffled(&items));
    }

    #[test]
    fn test_ranges() {
        let mut rng = SeedRng::seeded(7);

        for _ in 0..100 {
            assert!(rng.below(5) < 5);
            let unit = rng.unit();
            assert!((0.0..1.0).contains(&unit));
            let value = rng.range_inclusive(1, 40);
            assert!((1..=40).contains(&value));
        }

        assert_eq!(rng.below(0), 0);
        assert_eq!(rng.range_inclusive(5, 2), 5);
    }

    #[test]
    fn test_sample_and_pop_empty() {
        let mut rng = SeedRng::seeded(1);
        let empty: Vec<u8> = Vec::new();

        assert!(matches!(
            rng.sample(&empty),
            Err(ArgumentError::EmptyCollection(_))
        ));
        assert!(matches!(
            rng.pop_random(&mut empty.clone()),
            Err(ArgumentError::EmptyCollection(_))
        ));
    }

    #[test]
    fn test_pop_random_drains_without_repeats() {
        let mut rng = SeedRng::seeded(3);
        let mut items: Vec<u32> = (0..10).collect();

        let mut popped = Vec::new();
        while let Ok(item) = rng.pop_random(&mut items) {
            popped.push(item);
        }

        popped.sort();
        assert_eq!(popped, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffled_leaves_input() {
        let mut rng = SeedRng::seeded(9);
        let items = vec![1, 2, 3, 4, 5];
        let mut shuffled = rng.shuffled(&items);

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        shuffled.sort();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn test_unseeded_reports_no_seed() {
        let rng = SeedRng::new(None);
        assert_eq!(rng.seed(), None);
        assert_eq!(SeedRng::seeded(11).seed(), Some(11));
    }
}
