use crate::{error::Result, solution::Solution};

/// Maps a solution to its fitness. Lower is better.
///
/// A maximization problem negates its objective before returning it.
/// Evaluation may be expensive, which is why the solver evaluates new
/// individuals in parallel; it must not have externally observable side effects.
pub trait Evaluator<S: Solution>: Send + Sync {
    fn fitness_of(&self, solution: &S) -> Result<f64>;
}
