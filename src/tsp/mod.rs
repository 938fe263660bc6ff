//! # Travelling Salesman Collaborators
//!
//! Ready-made solution encodings, generators and evaluators for the symmetric
//! travelling salesman problem, with fitness equal to tour length.
//!
//! Two encodings are provided:
//!
//! - [`random_key`]: one key in `[0, 1)` per node, decoded by sorting.
//! - [`permutation_key`]: `n` transpositions applied to the identity tour.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use biasedga::evolution::{Solver, SolverOptions, SilentObserver};
//! use biasedga::rng::RandomNumberGenerator;
//! use biasedga::tsp::graph::EuclideanGraphGenerator;
//! use biasedga::tsp::random_key::{RandomKeyEvaluator, RandomKeyGenerator, RandomKeyTour};
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let graph = Arc::new(EuclideanGraphGenerator::new(10, 100.0).generate(&mut rng));
//!
//! let options = SolverOptions::builder()
//!     .population_size(30)
//!     .max_generations(20)
//!     .seed(1)
//!     .build()
//!     .unwrap();
//!
//! let mut solver: Solver<RandomKeyTour, _, _, _> = Solver::new(
//!     options,
//!     RandomKeyGenerator::new(&graph),
//!     RandomKeyEvaluator::new(Arc::clone(&graph)),
//!     SilentObserver,
//! )
//! .unwrap();
//!
//! let best = solver.solve().unwrap();
//! assert_eq!(best.solution().decode().len(), 10);
//! ```

pub mod graph;
pub mod permutation_key;
pub mod random_key;

pub use graph::{load_lower_diagonal, parse_lower_diagonal, EuclideanGraphGenerator, Graph};
pub use permutation_key::{PermutationKeyEvaluator, PermutationKeyGenerator, PermutationTour};
pub use random_key::{RandomKeyEvaluator, RandomKeyGenerator, RandomKeyTour};
