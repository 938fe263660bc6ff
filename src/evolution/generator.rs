use crate::{error::Result, rng::RandomNumberGenerator, solution::Solution};

/// A factory of fresh random solutions.
///
/// The solver calls `generate` concurrently from several worker threads, each
/// with its own random source, so implementations only need shared (`&self`)
/// access to their problem data.
pub trait Generator<S: Solution>: Send + Sync {
    /// Produces a new random solution using `rng` as the only source of randomness.
    fn generate(&self, rng: &mut RandomNumberGenerator) -> Result<S>;
}
