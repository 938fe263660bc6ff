use std::marker::PhantomData;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, instrument, trace};

use super::{
    evaluator::Evaluator,
    generator::Generator,
    observer::{Observer, SolverState},
    options::SolverOptions,
    population::{Population, ScoredIndividual},
};
use crate::{
    error::{OptionExt, Result, SolverError},
    rng::RandomNumberGenerator,
    solution::Solution,
};

/// A new best must undercut the previous one by more than this to count as
/// an improvement.
pub const IMPROVEMENT_TOLERANCE: f64 = 1e-6;

/// The termination condition that ended a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCondition {
    /// `max_generations` generations were evolved.
    MaxGenerations,
    /// `max_generations_no_improvement` consecutive generations did not improve.
    Stagnation,
    /// The wall-clock timeout elapsed.
    Timeout,
}

/// Everything known about a finished run.
#[derive(Debug, Clone)]
pub struct SolveReport<S> {
    /// The best individual ever seen. Elites are copied forward unchanged, so
    /// this is also the best member of the final population.
    pub best: ScoredIndividual<S>,
    /// Number of generations evolved after the initial population.
    pub generations: usize,
    pub stop_condition: StopCondition,
    pub elapsed: Duration,
}

/// Generation counter and stagnation counter of a running solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Progress {
    pub(crate) generation: usize,
    pub(crate) generations_no_improvement: usize,
}

impl Progress {
    /// Updates the stagnation counter from the best fitness before and after a generation.
    pub(crate) fn record(&mut self, old_best: f64, new_best: f64) {
        if new_best >= old_best - IMPROVEMENT_TOLERANCE {
            self.generations_no_improvement += 1;
        } else {
            self.generations_no_improvement = 0;
        }
    }

    pub(crate) fn stop_condition(
        &self,
        options: &SolverOptions,
        elapsed: Duration,
    ) -> Option<StopCondition> {
        if options
            .get_max_generations()
            .is_some_and(|max| self.generation >= max)
        {
            return Some(StopCondition::MaxGenerations);
        }

        if options
            .get_max_generations_no_improvement()
            .is_some_and(|max| self.generations_no_improvement >= max)
        {
            return Some(StopCondition::Stagnation);
        }

        if options.get_timeout().is_some_and(|timeout| elapsed >= timeout) {
            return Some(StopCondition::Timeout);
        }

        None
    }
}

/// Runs the biased genetic algorithm.
///
/// Each generation keeps the `elite_size` best individuals verbatim, injects
/// `reseed_size` freshly generated ones and fills every remaining slot with a
/// child of one elite and one non-elite parent. Mutants and children are built
/// and evaluated on a bounded worker pool that lives as long as the solver.
/// Both parallel phases are joined before the generation moves on, and the
/// new generation replaces the old one as a whole.
pub struct Solver<S, G, E, O>
where
    S: Solution,
    G: Generator<S>,
    E: Evaluator<S>,
    O: Observer<S>,
{
    options: SolverOptions,
    generator: G,
    evaluator: E,
    observer: O,
    pool: ThreadPool,
    _marker: PhantomData<S>,
}

impl<S, G, E, O> Solver<S, G, E, O>
where
    S: Solution,
    G: Generator<S>,
    E: Evaluator<S>,
    O: Observer<S>,
{
    /// Creates a solver and its worker pool.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::WorkerPool`] if the worker threads cannot be spawned.
    pub fn new(options: SolverOptions, generator: G, evaluator: E, observer: O) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(options.get_num_workers())
            .thread_name(|index| format!("biasedga-worker-{}", index))
            .build()
            .map_err(|e| SolverError::WorkerPool(e.to_string()))?;

        Ok(Self {
            options,
            generator,
            evaluator,
            observer,
            pool,
            _marker: PhantomData,
        })
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Runs the solver to termination and returns the best individual found.
    ///
    /// # Errors
    ///
    /// Any failure of the generator, the evaluator, a crossover or the observer
    /// aborts the run; no individual is returned in that case.
    pub fn solve(&mut self) -> Result<ScoredIndividual<S>> {
        self.solve_with_report().map(|report| report.best)
    }

    /// Like [`Solver::solve`], but also reports how the run ended.
    #[instrument(
        level = "info",
        skip(self),
        fields(
            population_size = self.options.get_population_size(),
            elite_size = self.options.elite_size(),
            reseed_size = self.options.reseed_size(),
            bias = self.options.get_bias()
        )
    )]
    pub fn solve_with_report(&mut self) -> Result<SolveReport<S>> {
        let start = Instant::now();
        let mut rng = match self.options.get_seed() {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };

        let mut population = self.initialise_population(&mut rng)?;
        let mut progress = Progress::default();

        info!(
            best_fitness = best_fitness(&population)?,
            "Initial population ready"
        );

        let stop_condition = loop {
            if let Some(condition) = progress.stop_condition(&self.options, start.elapsed()) {
                break condition;
            }

            let new_gen = self.evolve_new_generation(&population, &mut rng)?;
            progress.record(best_fitness(&population)?, best_fitness(&new_gen)?);
            population = new_gen;

            debug!(
                generation = progress.generation,
                best_fitness = best_fitness(&population)?,
                generations_no_improvement = progress.generations_no_improvement,
                "Generation committed"
            );

            if self.is_observed(progress.generation) {
                let state = SolverState::new(&population, progress.generations_no_improvement);
                self.observer.on_interval(
                    &state,
                    progress.generation,
                    start.elapsed().as_secs_f64(),
                )?;
            }

            progress.generation += 1;
        };

        let elapsed = start.elapsed();
        info!(
            generations = progress.generation,
            ?stop_condition,
            elapsed_s = elapsed.as_secs_f64(),
            "Solver terminated"
        );

        let state = SolverState::new(&population, progress.generations_no_improvement);
        self.observer
            .on_finish(&state, progress.generation, elapsed.as_secs_f64())?;

        let best = population
            .into_best()
            .ok_or_else_solver(|| SolverError::EmptyPopulation)?;

        Ok(SolveReport {
            best,
            generations: progress.generation,
            stop_condition,
            elapsed,
        })
    }

    fn is_observed(&self, generation: usize) -> bool {
        match self.observer.observe_every_n_generations() {
            Some(every) if every > 0 => generation % every == 0,
            _ => false,
        }
    }

    /// Builds the first population from `population_size` random individuals.
    fn initialise_population(&self, rng: &mut RandomNumberGenerator) -> Result<Population<S>> {
        let individuals = self.spawn_random(self.options.get_population_size(), rng)?;
        Ok(individuals.into_iter().collect())
    }

    /// Evolves the next generation from `population`, which is only read.
    #[instrument(level = "trace", skip_all)]
    pub(crate) fn evolve_new_generation(
        &self,
        population: &Population<S>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<S>> {
        let target = self.options.get_population_size();
        let elite_size = self.options.elite_size();

        let mut new_gen: Population<S> = population.iter().take(elite_size).cloned().collect();
        let (elite, normal) = population.split_elite(elite_size);

        let mutants = self.spawn_random(self.options.reseed_size(), rng)?;
        new_gen.extend(mutants);

        // Whatever the first two phases contributed, crossover fills the rest.
        let n_crossover = target.saturating_sub(new_gen.len());
        trace!(elite_size, n_crossover, "Filling generation by crossover");
        let children = self.breed_children(&elite, &normal, n_crossover, rng)?;
        new_gen.extend(children);

        if new_gen.len() != target {
            return Err(SolverError::PopulationSize {
                expected: target,
                actual: new_gen.len(),
            });
        }

        Ok(new_gen)
    }

    /// Generates and evaluates `count` random individuals in parallel.
    fn spawn_random(
        &self,
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<ScoredIndividual<S>>> {
        let seeds = rng.fork_seeds(count);
        let generator = &self.generator;
        let evaluator = &self.evaluator;

        self.pool.install(|| {
            seeds
                .into_par_iter()
                .map(|seed| {
                    let mut task_rng = RandomNumberGenerator::from_seed(seed);
                    let solution = generator.generate(&mut task_rng)?;
                    ScoredIndividual::evaluate(solution, evaluator)
                })
                .collect()
        })
    }

    /// Breeds and evaluates `count` children in parallel, each from a uniformly
    /// drawn elite parent and a uniformly drawn normal parent.
    fn breed_children(
        &self,
        elite: &[&S],
        normal: &[&S],
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<ScoredIndividual<S>>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        if elite.is_empty() || normal.is_empty() {
            return Err(SolverError::Crossover(format!(
                "cannot breed {} children from {} elite and {} normal parents",
                count,
                elite.len(),
                normal.len()
            )));
        }

        let seeds = rng.fork_seeds(count);
        let evaluator = &self.evaluator;
        let bias = self.options.get_bias();

        self.pool.install(|| {
            seeds
                .into_par_iter()
                .map(|seed| {
                    let mut task_rng = RandomNumberGenerator::from_seed(seed);
                    let elite_parent = elite[task_rng.gen_index(elite.len())];
                    let normal_parent = normal[task_rng.gen_index(normal.len())];
                    let child = elite_parent.crossover(normal_parent, bias, &mut task_rng)?;
                    ScoredIndividual::evaluate(child, evaluator)
                })
                .collect()
        })
    }
}

fn best_fitness<S>(population: &Population<S>) -> Result<f64> {
    population
        .best()
        .map(ScoredIndividual::fitness)
        .ok_or_else_solver(|| SolverError::EmptyPopulation)
}
