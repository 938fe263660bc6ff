//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps a seedable `StdRng` and provides the
//! handful of draws the solver and its collaborators need: probabilities for
//! biased crossover, uniform indices for parent selection and uniform floats
//! for random keys.
//!
//! Parallel phases never share a generator. Before fanning out, the solver
//! draws one seed per task from its master generator with [`RandomNumberGenerator::fork_seeds`]
//! and every task builds its own generator from that seed. With a fixed master
//! seed, the random stream seen by each task is therefore independent of the
//! order in which worker threads happen to run.
//!
//! ## Example
//!
//! ```rust
//! use biasedga::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let keys = rng.fetch_uniform(0.0, 1.0, 5);
//! assert_eq!(keys.len(), 5);
//!
//! let seeds = rng.fork_seeds(3);
//! let mut child = RandomNumberGenerator::from_seed(seeds[0]);
//! assert!(child.gen_probability() < 1.0);
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible runs, tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns a uniform draw in `[0, 1)`.
    ///
    /// Comparing the draw with `< bias` selects with probability exactly
    /// `bias`: a bias of `1.0` always selects, a bias of `0.0` never does.
    pub fn gen_probability(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns a uniform index in `[0, upper)`.
    ///
    /// # Panics
    ///
    /// Panics if `upper` is zero.
    pub fn gen_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    /// Generates `num` uniform floating-point numbers in `[from, to)`.
    pub fn fetch_uniform(&mut self, from: f64, to: f64, num: usize) -> Vec<f64> {
        (0..num).map(|_| self.rng.gen_range(from..to)).collect()
    }

    /// Draws `num` seeds for independent child generators.
    pub fn fork_seeds(&mut self, num: usize) -> Vec<u64> {
        (0..num).map(|_| self.rng.gen::<u64>()).collect()
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
