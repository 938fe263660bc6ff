//! # Caching Module
//!
//! Fitness caches for expensive evaluators. Biased crossover with a strong bias
//! frequently reproduces a parent exactly, so the same solution can be scored
//! many times over a run; wrapping the evaluator in a cache skips the repeats.
//!
//! Two flavours are provided:
//!
//! - [`CachedEvaluator`] shares one map between all worker threads behind a mutex.
//! - [`ThreadLocalCachedEvaluator`] gives every worker thread its own map, trading
//!   hit rate for zero contention.
//!
//! Only successful evaluations are cached; an evaluator error is passed through
//! and the next request for the same key evaluates again.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

use thread_local::ThreadLocal;

use crate::error::{Result, SolverError};
use crate::evolution::Evaluator;
use crate::solution::Solution;

/// A solution that can be used as a fitness-cache key.
///
/// Two solutions with the same key must have the same fitness.
pub trait CacheKey: Solution {
    type Key: Eq + Hash + Clone + Debug + Send + Sync;

    fn cache_key(&self) -> Self::Key;
}

/// An evaluator wrapper sharing one fitness cache across threads.
#[derive(Debug, Clone)]
pub struct CachedEvaluator<S, E>
where
    S: CacheKey,
    E: Evaluator<S>,
{
    evaluator: E,
    cache: Arc<Mutex<HashMap<S::Key, f64>>>,
    _marker: PhantomData<S>,
}

impl<S, E> CachedEvaluator<S, E>
where
    S: CacheKey,
    E: Evaluator<S>,
{
    pub fn new(evaluator: E) -> Self {
        Self::with_cache(evaluator, HashMap::new())
    }

    /// Creates a cached evaluator with a pre-populated cache.
    pub fn with_cache(evaluator: E, cache: HashMap<S::Key, f64>) -> Self {
        Self {
            evaluator,
            cache: Arc::new(Mutex::new(cache)),
            _marker: PhantomData,
        }
    }

    pub fn inner(&self) -> &E {
        &self.evaluator
    }

    pub fn cache_size(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn clear_cache(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }

    /// Returns a copy of the cache.
    pub fn get_cache(&self) -> Result<HashMap<S::Key, f64>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<S::Key, f64>>> {
        self.cache
            .lock()
            .map_err(|_| SolverError::Evaluation("fitness cache lock poisoned".to_string()))
    }
}

impl<S, E> Evaluator<S> for CachedEvaluator<S, E>
where
    S: CacheKey,
    E: Evaluator<S>,
{
    fn fitness_of(&self, solution: &S) -> Result<f64> {
        let key = solution.cache_key();

        if let Some(fitness) = self.lock()?.get(&key) {
            return Ok(*fitness);
        }

        // Evaluate outside the lock so other workers are not serialized behind us.
        let fitness = self.evaluator.fitness_of(solution)?;
        self.lock()?.insert(key, fitness);

        Ok(fitness)
    }
}

/// An evaluator wrapper keeping a separate fitness cache per thread.
#[derive(Debug)]
pub struct ThreadLocalCachedEvaluator<S, E>
where
    S: CacheKey,
    E: Evaluator<S>,
{
    evaluator: E,
    cache: ThreadLocal<RefCell<HashMap<S::Key, f64>>>,
    _marker: PhantomData<S>,
}

impl<S, E> ThreadLocalCachedEvaluator<S, E>
where
    S: CacheKey,
    E: Evaluator<S>,
{
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            cache: ThreadLocal::new(),
            _marker: PhantomData,
        }
    }

    pub fn inner(&self) -> &E {
        &self.evaluator
    }

    /// Number of cached fitness values for the current thread.
    pub fn cache_size(&self) -> usize {
        self.cache.get().map_or(0, |cell| cell.borrow().len())
    }

    /// Total number of cached fitness values across all threads.
    pub fn total_cache_size(&mut self) -> usize {
        self.cache.iter_mut().map(|cell| cell.get_mut().len()).sum()
    }

    /// Clears the cache of the current thread.
    pub fn clear_cache(&self) {
        if let Some(cell) = self.cache.get() {
            cell.borrow_mut().clear();
        }
    }
}

impl<S, E> Evaluator<S> for ThreadLocalCachedEvaluator<S, E>
where
    S: CacheKey,
    E: Evaluator<S>,
{
    fn fitness_of(&self, solution: &S) -> Result<f64> {
        let key = solution.cache_key();
        let cell = self.cache.get_or_default();

        let cached = cell.borrow().get(&key).copied();
        if let Some(fitness) = cached {
            return Ok(fitness);
        }

        let fitness = self.evaluator.fitness_of(solution)?;
        cell.borrow_mut().insert(key, fitness);

        Ok(fitness)
    }
}
