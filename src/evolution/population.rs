//! # Population
//!
//! A [`Population`] is the fitness-ordered multiset of [`ScoredIndividual`]s
//! making up one generation.
//!
//! Members are keyed by `(fitness, sequence)`, where the sequence number is
//! assigned on insertion. Two individuals with the same fitness are therefore
//! kept as distinct members: an insert never replaces or drops anything, and
//! `len()` always equals the number of inserts. Within a fitness tie the
//! earlier insert ranks first.
//!
//! ```rust
//! use biasedga::evolution::population::{Population, ScoredIndividual};
//!
//! let mut population = Population::new();
//! population.insert(ScoredIndividual::new("a", 2.0));
//! population.insert(ScoredIndividual::new("b", 1.0));
//! population.insert(ScoredIndividual::new("c", 1.0));
//!
//! assert_eq!(population.len(), 3);
//! assert_eq!(*population.best().unwrap().solution(), "b");
//! assert_eq!(population.fitness_values(), vec![1.0, 1.0, 2.0]);
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::{
    error::{Result, SolverError},
    evolution::evaluator::Evaluator,
    solution::Solution,
};

/// An immutable pairing of a solution with its fitness.
///
/// Scored individuals compare by fitness only through [`ScoredIndividual::cmp_fitness`];
/// they deliberately do not implement `Ord`, since equal fitness does not make
/// two individuals the same.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredIndividual<S> {
    solution: S,
    fitness: f64,
}

impl<S> ScoredIndividual<S> {
    pub fn new(solution: S, fitness: f64) -> Self {
        Self { solution, fitness }
    }

    pub fn solution(&self) -> &S {
        &self.solution
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn into_solution(self) -> S {
        self.solution
    }

    /// Total order by fitness, ascending.
    pub fn cmp_fitness(&self, other: &Self) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }
}

impl<S: Solution> ScoredIndividual<S> {
    /// Scores `solution` with `evaluator`.
    ///
    /// # Errors
    ///
    /// Propagates evaluator failures and returns [`SolverError::InvalidNumericValue`]
    /// for a NaN or infinite fitness.
    pub fn evaluate<E>(solution: S, evaluator: &E) -> Result<Self>
    where
        E: Evaluator<S> + ?Sized,
    {
        let fitness = evaluator.fitness_of(&solution)?;

        if !fitness.is_finite() {
            return Err(SolverError::InvalidNumericValue(format!(
                "Non-finite fitness encountered: {}",
                fitness
            )));
        }

        Ok(Self { solution, fitness })
    }
}

#[derive(Debug, Clone, Copy)]
struct RankKey {
    fitness: f64,
    sequence: u64,
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fitness
            .total_cmp(&other.fitness)
            .then(self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RankKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankKey {}

/// A duplicate-preserving, fitness-ordered container of scored individuals.
#[derive(Debug, Clone)]
pub struct Population<S> {
    members: BTreeMap<RankKey, ScoredIndividual<S>>,
    next_sequence: u64,
}

impl<S> Population<S> {
    pub fn new() -> Self {
        Self {
            members: BTreeMap::new(),
            next_sequence: 0,
        }
    }

    /// Inserts an individual. Never collapses fitness ties.
    pub fn insert(&mut self, individual: ScoredIndividual<S>) {
        let key = RankKey {
            fitness: individual.fitness,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.members.insert(key, individual);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The minimum-fitness member.
    pub fn best(&self) -> Option<&ScoredIndividual<S>> {
        self.members.values().next()
    }

    /// The maximum-fitness member.
    pub fn worst(&self) -> Option<&ScoredIndividual<S>> {
        self.members.values().next_back()
    }

    /// Members in ascending fitness order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ScoredIndividual<S>> + '_ {
        self.members.values()
    }

    pub fn fitness_values(&self) -> Vec<f64> {
        self.iter().map(ScoredIndividual::fitness).collect()
    }

    /// Splits the members into the elite set (the first `elite_size` in rank
    /// order) and the normal set (everyone else).
    pub fn split_elite(&self, elite_size: usize) -> (Vec<&S>, Vec<&S>) {
        let mut elite = Vec::with_capacity(elite_size.min(self.len()));
        let mut normal = Vec::with_capacity(self.len().saturating_sub(elite_size));

        for (rank, member) in self.iter().enumerate() {
            if rank < elite_size {
                elite.push(member.solution());
            } else {
                normal.push(member.solution());
            }
        }

        (elite, normal)
    }

    /// Consumes the population and yields its best member.
    pub fn into_best(self) -> Option<ScoredIndividual<S>> {
        self.members.into_values().next()
    }
}

impl<S> Default for Population<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Extend<ScoredIndividual<S>> for Population<S> {
    fn extend<I: IntoIterator<Item = ScoredIndividual<S>>>(&mut self, iter: I) {
        for individual in iter {
            self.insert(individual);
        }
    }
}

impl<S> FromIterator<ScoredIndividual<S>> for Population<S> {
    fn from_iter<I: IntoIterator<Item = ScoredIndividual<S>>>(iter: I) -> Self {
        let mut population = Population::new();
        population.extend(iter);
        population
    }
}
