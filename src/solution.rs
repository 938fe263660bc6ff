//! # Solution Trait
//!
//! The `Solution` trait defines the interface for the candidate answers the
//! solver evolves. The solver never looks inside a solution: it only clones
//! elites forward and asks pairs of parents to cross over.
//!
//! ## Example
//!
//! ```rust
//! use biasedga::error::{Result, SolverError};
//! use biasedga::rng::RandomNumberGenerator;
//! use biasedga::solution::Solution;
//!
//! #[derive(Clone, Debug)]
//! struct Bits {
//!     genes: Vec<bool>,
//! }
//!
//! impl Solution for Bits {
//!     fn crossover(&self, other: &Self, bias: f64, rng: &mut RandomNumberGenerator) -> Result<Self> {
//!         if self.genes.len() != other.genes.len() {
//!             return Err(SolverError::Crossover("length mismatch".to_string()));
//!         }
//!         let genes = self
//!             .genes
//!             .iter()
//!             .zip(&other.genes)
//!             .map(|(&mine, &theirs)| if rng.gen_probability() < bias { mine } else { theirs })
//!             .collect();
//!         Ok(Bits { genes })
//!     }
//! }
//! ```

use std::fmt::Debug;

use crate::{error::Result, rng::RandomNumberGenerator};

/// Trait for types that represent candidate solutions.
///
/// Copying a solution is the standard `Clone`; the copy must share no mutable
/// state with the original. Types must also be `Send` and `Sync` because
/// parents are read concurrently from several worker threads.
pub trait Solution: Clone + Debug + Send + Sync {
    /// Builds a child by biased uniform crossover.
    ///
    /// For every independently inherited unit of genetic material the child
    /// takes `self`'s unit with probability `bias` and `other`'s unit with
    /// probability `1 - bias`. Neither parent is modified. With `bias = 1.0`
    /// the child must equal `self`; with `bias = 0.0` it must equal `other`.
    ///
    /// The solver always calls this on the elite parent, passing the non-elite
    /// parent as `other`.
    ///
    /// ## Errors
    ///
    /// Implementations return [`SolverError::Crossover`](crate::error::SolverError::Crossover)
    /// when the parents are incompatible (for example, of different lengths).
    fn crossover(&self, other: &Self, bias: f64, rng: &mut RandomNumberGenerator) -> Result<Self>;
}
