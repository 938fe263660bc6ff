//! Permutation-key (transposition) tour encoding.
//!
//! A tour over `n` nodes is encoded as `2n` node indices read in pairs: each
//! pair `(a, b)` swaps positions `a` and `b`, and applying all `n` swaps in
//! order to the identity tour yields the encoded tour. Crossover inherits whole
//! transpositions, never half of one.

use std::sync::Arc;

use crate::{
    caching::CacheKey,
    error::{Result, SolverError},
    evolution::{Evaluator, Generator},
    rng::RandomNumberGenerator,
    solution::Solution,
};

use super::graph::Graph;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermutationTour {
    transpositions: Vec<usize>,
}

impl PermutationTour {
    pub fn new(transpositions: Vec<usize>) -> Self {
        Self { transpositions }
    }

    pub fn transpositions(&self) -> &[usize] {
        &self.transpositions
    }

    /// Applies the transpositions to the identity tour over `nodes_num` nodes.
    pub fn decode(&self, nodes_num: usize) -> Result<Vec<usize>> {
        if self.transpositions.len() != 2 * nodes_num {
            return Err(SolverError::Evaluation(format!(
                "{} transposition entries for {} nodes",
                self.transpositions.len(),
                nodes_num
            )));
        }

        let mut tour: Vec<usize> = (0..nodes_num).collect();
        for pair in self.transpositions.chunks_exact(2) {
            let (a, b) = (pair[0], pair[1]);
            if a >= nodes_num || b >= nodes_num {
                return Err(SolverError::Evaluation(format!(
                    "transposition ({}, {}) out of range for {} nodes",
                    a, b, nodes_num
                )));
            }
            tour.swap(a, b);
        }

        Ok(tour)
    }
}

impl Solution for PermutationTour {
    fn crossover(&self, other: &Self, bias: f64, rng: &mut RandomNumberGenerator) -> Result<Self> {
        if self.transpositions.len() != other.transpositions.len() {
            return Err(SolverError::Crossover(format!(
                "permutation tours of length {} and {}",
                self.transpositions.len(),
                other.transpositions.len()
            )));
        }

        let mut transpositions = Vec::with_capacity(self.transpositions.len());
        for (mine, theirs) in self
            .transpositions
            .chunks(2)
            .zip(other.transpositions.chunks(2))
        {
            if rng.gen_probability() < bias {
                transpositions.extend_from_slice(mine);
            } else {
                transpositions.extend_from_slice(theirs);
            }
        }

        Ok(Self { transpositions })
    }
}

impl CacheKey for PermutationTour {
    type Key = Vec<usize>;

    fn cache_key(&self) -> Self::Key {
        self.transpositions.clone()
    }
}

#[derive(Debug, Clone)]
pub struct PermutationKeyGenerator {
    nodes_num: usize,
}

impl PermutationKeyGenerator {
    pub fn new(graph: &Graph) -> Self {
        Self {
            nodes_num: graph.nodes_num(),
        }
    }
}

impl Generator<PermutationTour> for PermutationKeyGenerator {
    fn generate(&self, rng: &mut RandomNumberGenerator) -> Result<PermutationTour> {
        if self.nodes_num == 0 {
            return Err(SolverError::Generation("graph has no nodes".to_string()));
        }
        let transpositions = (0..2 * self.nodes_num)
            .map(|_| rng.gen_index(self.nodes_num))
            .collect();
        Ok(PermutationTour::new(transpositions))
    }
}

/// Scores a permutation-key tour by the length of the tour it decodes to.
#[derive(Debug, Clone)]
pub struct PermutationKeyEvaluator {
    graph: Arc<Graph>,
}

impl PermutationKeyEvaluator {
    pub fn new(graph: Arc<Graph>) -> Self {
        Self { graph }
    }
}

impl Evaluator<PermutationTour> for PermutationKeyEvaluator {
    fn fitness_of(&self, solution: &PermutationTour) -> Result<f64> {
        let tour = solution.decode(self.graph.nodes_num())?;
        Ok(self.graph.tour_length(&tour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Arc<Graph> {
        // Nodes on a line at 0, 1, 2, 3.
        let rows: Vec<Vec<f64>> = (0..4)
            .map(|i: i32| (0..4).map(|j: i32| (i - j).abs() as f64).collect::<Vec<f64>>())
            .collect();
        Arc::new(Graph::from_matrix(rows).unwrap())
    }

    #[test]
    fn test_decode_applies_swaps_in_order() {
        let tour = PermutationTour::new(vec![0, 1, 1, 2, 3, 3, 0, 0]);
        // [0,1,2,3] -> [1,0,2,3] -> [1,2,0,3]
        assert_eq!(tour.decode(4).unwrap(), vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        let wrong_length = PermutationTour::new(vec![0, 1]);
        assert!(matches!(
            wrong_length.decode(4),
            Err(SolverError::Evaluation(_))
        ));

        let out_of_range = PermutationTour::new(vec![0, 4, 0, 0, 0, 0, 0, 0]);
        assert!(matches!(
            out_of_range.decode(4),
            Err(SolverError::Evaluation(_))
        ));
    }

    #[test]
    fn test_evaluator() {
        let evaluator = PermutationKeyEvaluator::new(line());

        let identity = PermutationTour::new(vec![0; 8]);
        assert_eq!(evaluator.fitness_of(&identity).unwrap(), 6.0);

        // [0,1,2,3] -> [0,2,1,3]: 2 + 1 + 2 + 3
        let zigzag = PermutationTour::new(vec![1, 2, 0, 0, 0, 0, 0, 0]);
        assert_eq!(evaluator.fitness_of(&zigzag).unwrap(), 8.0);
    }

    #[test]
    fn test_crossover_keeps_pairs_together() {
        let mut rng = RandomNumberGenerator::from_seed(8);
        let elite = PermutationTour::new((0..40).map(|i| i % 2).collect());
        let normal = PermutationTour::new(vec![7; 40]);

        let child = elite.crossover(&normal, 0.5, &mut rng).unwrap();
        assert_eq!(child.transpositions().len(), 40);
        for pair in child.transpositions().chunks(2) {
            assert!(pair == [0, 1] || pair == [7, 7]);
        }
    }

    #[test]
    fn test_crossover_degenerate_bias() {
        let mut rng = RandomNumberGenerator::from_seed(12);
        let elite = PermutationTour::new(vec![0, 1, 2, 3, 1, 1]);
        let normal = PermutationTour::new(vec![2, 2, 0, 1, 2, 0]);

        for _ in 0..20 {
            assert_eq!(elite.crossover(&normal, 1.0, &mut rng).unwrap(), elite);
            assert_eq!(elite.crossover(&normal, 0.0, &mut rng).unwrap(), normal);
        }
    }

    #[test]
    fn test_generator_covers_all_entries() {
        let mut rng = RandomNumberGenerator::from_seed(6);
        let graph = line();
        let tour = PermutationKeyGenerator::new(&graph)
            .generate(&mut rng)
            .unwrap();

        assert_eq!(tour.transpositions().len(), 8);
        assert!(tour.transpositions().iter().all(|&t| t < 4));
        assert!(tour.decode(4).is_ok());
    }

    #[test]
    fn test_cache_key_identifies_tour() {
        let a = PermutationTour::new(vec![1, 0, 2, 2]);
        assert_eq!(a.cache_key(), a.clone().cache_key());
        assert_ne!(a.cache_key(), PermutationTour::new(vec![0, 1, 2, 2]).cache_key());
    }
}
