pub mod builder;
pub mod csv_observer;
pub mod evaluator;
pub mod generator;
pub mod observer;
pub mod options;
pub mod population;
pub mod solver;

pub use builder::SolverBuilder;
pub use csv_observer::CsvObserver;
pub use evaluator::Evaluator;
pub use generator::Generator;
pub use observer::{Observer, SilentObserver, SolverState};
pub use options::{SolverOptions, SolverOptionsBuilder};
pub use population::{Population, ScoredIndividual};
pub use solver::{SolveReport, Solver, StopCondition, IMPROVEMENT_TOLERANCE};
