//! # Observer
//!
//! Observers are notified by the solver at a fixed generation cadence and
//! once when the run ends. They receive a read-only [`SolverState`] holding the
//! population that was just committed, never a generation under construction.

use crate::{
    error::Result,
    evolution::population::{Population, ScoredIndividual},
    solution::Solution,
};

/// A read-only snapshot of the solver, handed to observer hooks.
#[derive(Debug)]
pub struct SolverState<'a, S> {
    population: &'a Population<S>,
    generations_no_improvement: usize,
}

impl<'a, S> SolverState<'a, S> {
    pub(crate) fn new(population: &'a Population<S>, generations_no_improvement: usize) -> Self {
        Self {
            population,
            generations_no_improvement,
        }
    }

    /// The committed population.
    pub fn population(&self) -> &'a Population<S> {
        self.population
    }

    /// The current best individual.
    pub fn best(&self) -> Option<&'a ScoredIndividual<S>> {
        self.population.best()
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.best().map(ScoredIndividual::fitness)
    }

    /// Consecutive generations without an improvement beyond the tolerance.
    pub fn generations_no_improvement(&self) -> usize {
        self.generations_no_improvement
    }
}

/// Hook invoked by the solver during and at the end of a run.
pub trait Observer<S: Solution> {
    /// How often [`Observer::on_interval`] fires. `None` (the default) or
    /// `Some(0)` means never.
    fn observe_every_n_generations(&self) -> Option<usize> {
        None
    }

    /// Called after generation `generation` is committed, whenever
    /// `generation` is a multiple of the cadence.
    fn on_interval(
        &mut self,
        state: &SolverState<'_, S>,
        generation: usize,
        elapsed_seconds: f64,
    ) -> Result<()>;

    /// Called exactly once when the run ends, whichever condition stopped it.
    fn on_finish(
        &mut self,
        state: &SolverState<'_, S>,
        generation: usize,
        total_elapsed_seconds: f64,
    ) -> Result<()>;
}

/// An observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl<S: Solution> Observer<S> for SilentObserver {
    fn on_interval(&mut self, _: &SolverState<'_, S>, _: usize, _: f64) -> Result<()> {
        Ok(())
    }

    fn on_finish(&mut self, _: &SolverState<'_, S>, _: usize, _: f64) -> Result<()> {
        Ok(())
    }
}

impl<S, O> Observer<S> for &mut O
where
    S: Solution,
    O: Observer<S> + ?Sized,
{
    fn observe_every_n_generations(&self) -> Option<usize> {
        (**self).observe_every_n_generations()
    }

    fn on_interval(
        &mut self,
        state: &SolverState<'_, S>,
        generation: usize,
        elapsed_seconds: f64,
    ) -> Result<()> {
        (**self).on_interval(state, generation, elapsed_seconds)
    }

    fn on_finish(
        &mut self,
        state: &SolverState<'_, S>,
        generation: usize,
        total_elapsed_seconds: f64,
    ) -> Result<()> {
        (**self).on_finish(state, generation, total_elapsed_seconds)
    }
}
