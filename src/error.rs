//! # Error Types
//!
//! This module defines the error type shared by the whole solver. Every
//! fallible operation in the crate, including the collaborator capabilities
//! (generation, evaluation, crossover, observation), reports a [`SolverError`].
//!
//! A failure inside any parallel worker aborts the current generation and is
//! returned from [`Solver::solve`](crate::evolution::Solver::solve); a partially
//! built population is never handed back to the caller.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use biasedga::error::{Result, SolverError};
//!
//! fn checked_share(share: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&share) {
//!         return Err(SolverError::InvalidConfiguration(format!(
//!             "share {} is outside [0, 1]",
//!             share
//!         )));
//!     }
//!     Ok(share)
//! }
//!
//! assert!(checked_share(0.5).is_ok());
//! assert!(checked_share(1.5).is_err());
//! ```
//!
//! Using the `ResultExt` trait to add context to errors:
//!
//! ```rust
//! use biasedga::error::{Result, ResultExt};
//!
//! fn parse_node_count(token: &str) -> Result<usize> {
//!     token.parse::<usize>().context("Invalid node count")
//! }
//!
//! assert!(parse_node_count("17").is_ok());
//! assert!(parse_node_count("seventeen").is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use biasedga::error::{OptionExt, SolverError};
//!
//! fn best_of(fitness: &[f64]) -> biasedga::error::Result<f64> {
//!     fitness
//!         .iter()
//!         .cloned()
//!         .min_by(|a, b| a.total_cmp(b))
//!         .ok_or_else_solver(|| SolverError::EmptyPopulation)
//! }
//!
//! assert_eq!(best_of(&[3.0, 1.0, 2.0]).unwrap(), 1.0);
//! assert!(best_of(&[]).is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while configuring or running the solver.
#[derive(Error, Debug)]
pub enum SolverError {
    /// The solver parameters are inconsistent. Reported before any solving begins.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A generator failed to produce a new random solution.
    #[error("Generation error: {0}")]
    Generation(String),

    /// An evaluator failed to compute the fitness of a solution.
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Biased crossover between two parents failed.
    #[error("Crossover error: {0}")]
    Crossover(String),

    /// An evaluator returned NaN or an infinite fitness.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// A generation was assembled with the wrong number of individuals.
    #[error("Population size error: expected {expected} individuals, found {actual}")]
    PopulationSize { expected: usize, actual: usize },

    /// The best individual was requested from an empty population.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// The bounded worker pool could not be created.
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    /// An observer hook failed.
    #[error("Observer error: {0}")]
    Observer(String),

    /// A problem instance could not be read.
    #[error("Instance error: {0}")]
    Instance(String),

    /// Error that occurs when an I/O operation fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;

/// Extension trait for Result to add context to errors.
///
/// The source error is flattened into a [`SolverError::Instance`], which is
/// where foreign errors (parsing, formatting) show up in practice.
pub trait ResultExt<T, E> {
    /// Converts the error to a `SolverError` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| SolverError::Instance(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, SolverError>` using `err_fn`
    /// to build the error.
    fn ok_or_else_solver<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SolverError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_solver<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SolverError,
    {
        self.ok_or_else(err_fn)
    }
}
