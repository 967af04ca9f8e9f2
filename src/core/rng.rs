//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Forkable**: Derive an independent stream per AI seat
//! - **Context streams**: Independent sequences for setup steps
//! - **Injectable**: AI strategies draw through the [`RandomSource`] trait,
//!   so tests can substitute a [`SequenceSource`]
//!
//! ```
//! use gem_market::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut seat_rng = rng.fork();
//!
//! // Original and fork produce different sequences
//! assert_ne!(rng.gen_range(0..1000), seat_rng.gen_range(0..1000));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Source of randomness for AI decisions and profile rolls.
pub trait RandomSource: Send {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..upper`. `upper` must be non-zero.
    fn next_index(&mut self, upper: usize) -> usize;

    /// `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }

    /// Uniform value in `[low, high)`.
    fn next_between(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_unit()
    }
}

/// Deterministic RNG (ChaCha8) with forking.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

impl RandomSource for GameRng {
    fn next_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn next_index(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper.max(1))
    }
}

/// Replays a fixed sequence of unit values, cycling when exhausted.
///
/// ```
/// use gem_market::core::{RandomSource, SequenceSource};
///
/// let mut source = SequenceSource::new(vec![0.0, 0.99]);
/// assert!(source.chance(0.5));
/// assert_eq!(source.next_index(4), 3);
/// assert_eq!(source.next_unit(), 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// Values are clamped into `[0, 1)`. An empty list behaves as `[0.0]`.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        let values = if values.is_empty() {
            vec![0.0]
        } else {
            values.into_iter().map(|v| v.clamp(0.0, 0.999_999)).collect()
        };
        Self { values, cursor: 0 }
    }

    /// A source that always returns the same value.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }

    fn next_index(&mut self, upper: usize) -> usize {
        let upper = upper.max(1);
        ((self.next_unit() * upper as f64) as usize).min(upper - 1)
    }
}
