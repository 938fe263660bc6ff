//! # Benchmark
//!
//! Helpers for running the same solver configuration several times and
//! summarising the best fitness of each run.
//!
//! ```rust
//! use biasedga::benchmark::run_trials;
//!
//! let summary = run_trials(3, |run| Ok(10.0 + run as f64)).unwrap();
//! assert_eq!(summary.runs, 3);
//! assert_eq!(summary.mean, 11.0);
//! assert_eq!(summary.std_dev, 1.0);
//! assert_eq!(summary.best, 10.0);
//! ```

use tracing::info;

use crate::error::{OptionExt, Result, SolverError};

/// Mean, sample standard deviation and minimum of a set of trial results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialSummary {
    pub runs: usize,
    pub mean: f64,
    /// Sample standard deviation (`n - 1` denominator); zero for a single run.
    pub std_dev: f64,
    pub best: f64,
}

impl TrialSummary {
    /// Summarises `values`; `None` when there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let runs = values.len();
        let best = values.iter().copied().min_by(|a, b| a.total_cmp(b))?;
        let mean = values.iter().sum::<f64>() / runs as f64;

        let std_dev = if runs > 1 {
            let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (runs - 1) as f64).sqrt()
        } else {
            0.0
        };

        Some(Self {
            runs,
            mean,
            std_dev,
            best,
        })
    }
}

/// Runs `trial` `reruns` times, passing the run index, and summarises the
/// returned fitness values. The first failing trial aborts the whole batch.
pub fn run_trials<F>(reruns: usize, mut trial: F) -> Result<TrialSummary>
where
    F: FnMut(usize) -> Result<f64>,
{
    let mut results = Vec::with_capacity(reruns);
    for run in 0..reruns {
        let fitness = trial(run)?;
        info!(run, fitness, "Trial finished");
        results.push(fitness);
    }

    TrialSummary::from_values(&results).ok_or_else_solver(|| {
        SolverError::InvalidConfiguration("at least one trial is required".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value_has_zero_deviation() {
        let summary = TrialSummary::from_values(&[4.5]).unwrap();
        assert_eq!(summary.runs, 1);
        assert_eq!(summary.mean, 4.5);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.best, 4.5);
    }

    #[test]
    fn test_sample_deviation() {
        let summary = TrialSummary::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(summary.mean, 5.0);
        // Sum of squares is 32 over 7 degrees of freedom.
        assert!((summary.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(summary.best, 2.0);
    }

    #[test]
    fn test_no_values() {
        assert!(TrialSummary::from_values(&[]).is_none());
        assert!(matches!(
            run_trials(0, |_| Ok(1.0)),
            Err(SolverError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_failing_trial_aborts() {
        let mut calls = 0;
        let result = run_trials(5, |run| {
            calls += 1;
            if run == 2 {
                Err(SolverError::Evaluation("boom".to_string()))
            } else {
                Ok(1.0)
            }
        });
        assert!(matches!(result, Err(SolverError::Evaluation(_))));
        assert_eq!(calls, 3);
    }
}
