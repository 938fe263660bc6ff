pub mod benchmark;
pub mod caching;
pub mod error;
pub mod evolution;
pub mod rng;
pub mod solution;
pub mod tsp;

// Re-export commonly used types for convenience
pub use error::{OptionExt, Result, ResultExt, SolverError};
pub use evolution::{
    Evaluator, Generator, Observer, ScoredIndividual, Solver, SolverOptions, SolverState,
};
pub use solution::Solution;
