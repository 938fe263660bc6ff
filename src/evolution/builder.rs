use std::marker::PhantomData;

use crate::{
    error::{Result, SolverError},
    solution::Solution,
};

use super::{
    evaluator::Evaluator,
    generator::Generator,
    observer::{Observer, SilentObserver},
    options::SolverOptions,
    solver::Solver,
};

/// Fluent construction of a [`Solver`].
///
/// The generator and evaluator are required. Options default to
/// [`SolverOptions::default`] and the observer to [`SilentObserver`].
pub struct SolverBuilder<S, G, E, O = SilentObserver>
where
    S: Solution,
    G: Generator<S>,
    E: Evaluator<S>,
    O: Observer<S>,
{
    options: Option<SolverOptions>,
    generator: Option<G>,
    evaluator: Option<E>,
    observer: O,
    _marker: PhantomData<S>,
}

impl<S, G, E> SolverBuilder<S, G, E, SilentObserver>
where
    S: Solution,
    G: Generator<S>,
    E: Evaluator<S>,
{
    pub fn new() -> Self {
        Self {
            options: None,
            generator: None,
            evaluator: None,
            observer: SilentObserver,
            _marker: PhantomData,
        }
    }
}

impl<S, G, E> Default for SolverBuilder<S, G, E, SilentObserver>
where
    S: Solution,
    G: Generator<S>,
    E: Evaluator<S>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, G, E, O> SolverBuilder<S, G, E, O>
where
    S: Solution,
    G: Generator<S>,
    E: Evaluator<S>,
    O: Observer<S>,
{
    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_generator(mut self, generator: G) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_evaluator(mut self, evaluator: E) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Replaces the observer, changing the builder's observer type.
    pub fn with_observer<O2>(self, observer: O2) -> SolverBuilder<S, G, E, O2>
    where
        O2: Observer<S>,
    {
        SolverBuilder {
            options: self.options,
            generator: self.generator,
            evaluator: self.evaluator,
            observer,
            _marker: PhantomData,
        }
    }

    pub fn build(self) -> Result<Solver<S, G, E, O>> {
        let generator = self.generator.ok_or_else(|| {
            SolverError::InvalidConfiguration("Generator must be provided".to_string())
        })?;

        let evaluator = self.evaluator.ok_or_else(|| {
            SolverError::InvalidConfiguration("Evaluator must be provided".to_string())
        })?;

        Solver::new(
            self.options.unwrap_or_default(),
            generator,
            evaluator,
            self.observer,
        )
    }
}
