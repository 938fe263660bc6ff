//! Random-key tour encoding.
//!
//! A tour over `n` nodes is encoded as `n` keys in `[0, 1)`; visiting the
//! nodes by increasing key gives the tour. Every key vector decodes to a valid
//! tour, so biased crossover can mix keys freely, one key at a time.

use std::sync::Arc;

use crate::{
    error::{Result, SolverError},
    evolution::{Evaluator, Generator},
    rng::RandomNumberGenerator,
    solution::Solution,
};

use super::graph::Graph;

#[derive(Debug, Clone, PartialEq)]
pub struct RandomKeyTour {
    keys: Vec<f64>,
}

impl RandomKeyTour {
    pub fn new(keys: Vec<f64>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[f64] {
        &self.keys
    }

    /// Node indices sorted by key.
    pub fn decode(&self) -> Vec<usize> {
        let mut tour: Vec<usize> = (0..self.keys.len()).collect();
        tour.sort_by(|&a, &b| self.keys[a].total_cmp(&self.keys[b]));
        tour
    }
}

impl Solution for RandomKeyTour {
    fn crossover(&self, other: &Self, bias: f64, rng: &mut RandomNumberGenerator) -> Result<Self> {
        if self.keys.len() != other.keys.len() {
            return Err(SolverError::Crossover(format!(
                "random-key tours of length {} and {}",
                self.keys.len(),
                other.keys.len()
            )));
        }

        let keys = self
            .keys
            .iter()
            .zip(&other.keys)
            .map(|(&mine, &theirs)| {
                if rng.gen_probability() < bias {
                    mine
                } else {
                    theirs
                }
            })
            .collect();

        Ok(Self { keys })
    }
}

#[derive(Debug, Clone)]
pub struct RandomKeyGenerator {
    nodes_num: usize,
}

impl RandomKeyGenerator {
    pub fn new(graph: &Graph) -> Self {
        Self {
            nodes_num: graph.nodes_num(),
        }
    }
}

impl Generator<RandomKeyTour> for RandomKeyGenerator {
    fn generate(&self, rng: &mut RandomNumberGenerator) -> Result<RandomKeyTour> {
        if self.nodes_num == 0 {
            return Err(SolverError::Generation("graph has no nodes".to_string()));
        }
        Ok(RandomKeyTour::new(rng.fetch_uniform(0.0, 1.0, self.nodes_num)))
    }
}

/// Scores a random-key tour by the length of the tour it decodes to.
#[derive(Debug, Clone)]
pub struct RandomKeyEvaluator {
    graph: Arc<Graph>,
}

impl RandomKeyEvaluator {
    pub fn new(graph: Arc<Graph>) -> Self {
        Self { graph }
    }
}

impl Evaluator<RandomKeyTour> for RandomKeyEvaluator {
    fn fitness_of(&self, solution: &RandomKeyTour) -> Result<f64> {
        if solution.keys.len() != self.graph.nodes_num() {
            return Err(SolverError::Evaluation(format!(
                "tour has {} keys for a graph of {} nodes",
                solution.keys.len(),
                self.graph.nodes_num()
            )));
        }
        Ok(self.graph.tour_length(&solution.decode()))
    }
}
