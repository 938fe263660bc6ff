//! # Graph
//!
//! Complete weighted graphs for the travelling salesman problem, together with
//! the two ways of obtaining one: random Euclidean instances and TSPLib files
//! stored in `LOWER_DIAG_ROW` form.
//!
//! ```rust
//! use biasedga::tsp::graph::{parse_lower_diagonal, Graph};
//!
//! // 3 nodes: d(1,0) = 2, d(2,0) = 4, d(2,1) = 3
//! let graph = parse_lower_diagonal("3\n0\n2 0\n4 3 0\n").unwrap();
//! assert_eq!(graph.nodes_num(), 3);
//! assert_eq!(graph.distance(0, 2), 4.0);
//! assert_eq!(graph.tour_length(&[0, 1, 2]), 9.0);
//! ```

use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use crate::{
    error::{Result, ResultExt, SolverError},
    rng::RandomNumberGenerator,
};

/// A complete graph stored as a dense, row-major distance matrix.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "UncheckedGraph"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes_num: usize,
    distance: Vec<f64>,
}

impl Graph {
    /// Builds a graph from a square matrix of distances.
    pub fn from_matrix(rows: Vec<Vec<f64>>) -> Result<Self> {
        let nodes_num = rows.len();
        let mut distance = Vec::with_capacity(nodes_num * nodes_num);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != nodes_num {
                return Err(SolverError::Instance(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    nodes_num
                )));
            }
            distance.extend(row);
        }

        Ok(Self {
            nodes_num,
            distance,
        })
    }

    pub fn nodes_num(&self) -> usize {
        self.nodes_num
    }

    /// Distance between nodes `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either node is out of range.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.nodes_num && j < self.nodes_num,
            "node out of range"
        );
        self.distance[i * self.nodes_num + j]
    }

    /// Length of the closed tour visiting `tour` in order and returning to its start.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        let (first, last) = match (tour.first(), tour.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return 0.0,
        };

        let open: f64 = tour
            .windows(2)
            .map(|pair| self.distance(pair[0], pair[1]))
            .sum();

        open + self.distance(last, first)
    }
}

/// A graph as read from a serialized form, before its matrix is checked.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct UncheckedGraph {
    nodes_num: usize,
    distance: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedGraph> for Graph {
    type Error = SolverError;

    fn try_from(raw: UncheckedGraph) -> Result<Self> {
        let expected = raw.nodes_num.checked_mul(raw.nodes_num).ok_or_else(|| {
            SolverError::Instance(format!("{} nodes is too many", raw.nodes_num))
        })?;
        if raw.distance.len() != expected {
            return Err(SolverError::Instance(format!(
                "distance matrix has {} entries, expected {} for {} nodes",
                raw.distance.len(),
                expected,
                raw.nodes_num
            )));
        }

        Ok(Self {
            nodes_num: raw.nodes_num,
            distance: raw.distance,
        })
    }
}

/// Generates random graphs whose nodes lie uniformly in a disc of diameter
/// `max_distance`, weighted by Euclidean distance.
#[derive(Debug, Clone)]
pub struct EuclideanGraphGenerator {
    nodes_num: usize,
    max_distance: f64,
}

impl EuclideanGraphGenerator {
    pub fn new(nodes_num: usize, max_distance: f64) -> Self {
        Self {
            nodes_num,
            max_distance,
        }
    }

    pub fn generate(&self, rng: &mut RandomNumberGenerator) -> Graph {
        let radius = self.max_distance / 2.0;
        let points: Vec<(f64, f64)> = (0..self.nodes_num)
            .map(|_| {
                let r = radius * rng.gen_probability().sqrt();
                let angle = rng.gen_probability() * 2.0 * PI;
                (r * angle.cos(), r * angle.sin())
            })
            .collect();

        let n = self.nodes_num;
        let mut distance = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = (points[i].0 - points[j].0).hypot(points[i].1 - points[j].1);
                distance[i * n + j] = d;
                distance[j * n + i] = d;
            }
        }

        Graph {
            nodes_num: n,
            distance,
        }
    }
}

/// Parses a TSPLib `LOWER_DIAG_ROW` instance body.
///
/// The input is a whitespace-separated list of integers: the node count `n`
/// followed by the `n * (n + 1) / 2` entries of the lower triangle, row by row,
/// diagonal included. Extra trailing tokens are ignored.
pub fn parse_lower_diagonal(text: &str) -> Result<Graph> {
    let mut tokens = text.split_whitespace();

    let nodes_num: usize = tokens
        .next()
        .ok_or_else(|| SolverError::Instance("empty instance".to_string()))?
        .parse()
        .context("Invalid node count")?;

    let mut distance = vec![0.0; nodes_num * nodes_num];
    for i in 0..nodes_num {
        for j in 0..=i {
            let token = tokens.next().ok_or_else(|| {
                SolverError::Instance(format!(
                    "instance ended before entry ({}, {}) of {} nodes",
                    i, j, nodes_num
                ))
            })?;
            let d = token
                .parse::<i64>()
                .context(format!("Invalid distance '{}'", token))? as f64;
            distance[i * nodes_num + j] = d;
            distance[j * nodes_num + i] = d;
        }
    }

    Ok(Graph {
        nodes_num,
        distance,
    })
}

/// Reads and parses a TSPLib `LOWER_DIAG_ROW` file.
pub fn load_lower_diagonal<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_lower_diagonal(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_matrix_rejects_ragged_rows() {
        let result = Graph::from_matrix(vec![vec![0.0, 1.0], vec![1.0]]);
        assert!(matches!(result, Err(SolverError::Instance(_))));
    }

    #[test]
    fn test_tour_length_closes_cycle() {
        let graph = Graph::from_matrix(vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 5.0],
            vec![2.0, 5.0, 0.0],
        ])
        .unwrap();

        assert_eq!(graph.tour_length(&[0, 1, 2]), 8.0);
        assert_eq!(graph.tour_length(&[2, 1, 0]), 8.0);
        assert_eq!(graph.tour_length(&[1]), 0.0);
        assert_eq!(graph.tour_length(&[]), 0.0);
    }

    #[test]
    fn test_euclidean_graph_is_symmetric_and_bounded() {
        let mut rng = RandomNumberGenerator::from_seed(9);
        let graph = EuclideanGraphGenerator::new(12, 100.0).generate(&mut rng);

        assert_eq!(graph.nodes_num(), 12);
        for i in 0..12 {
            assert_eq!(graph.distance(i, i), 0.0);
            for j in 0..12 {
                assert_eq!(graph.distance(i, j), graph.distance(j, i));
                assert!(graph.distance(i, j) <= 100.0);
            }
        }
    }

    #[test]
    fn test_parse_lower_diagonal() {
        let graph = parse_lower_diagonal("4\n 0\n 3 0\n 5 4 0\n 9 8 7 0\n").unwrap();

        assert_eq!(graph.nodes_num(), 4);
        assert_eq!(graph.distance(1, 0), 3.0);
        assert_eq!(graph.distance(0, 3), 9.0);
        assert_eq!(graph.distance(2, 3), 7.0);
        assert_eq!(graph.distance(3, 3), 0.0);
    }

    #[test]
    fn test_parse_short_instance() {
        let result = parse_lower_diagonal("3 0 1 0 2");
        match result {
            Err(SolverError::Instance(msg)) => assert!(msg.contains("ended before")),
            other => panic!("Expected Instance error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_lower_diagonal(""),
            Err(SolverError::Instance(_))
        ));
        assert!(matches!(
            parse_lower_diagonal("two 0 1 0"),
            Err(SolverError::Instance(_))
        ));
        assert!(matches!(
            parse_lower_diagonal("2 0 x 0"),
            Err(SolverError::Instance(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_checks_matrix_size() {
        let short = serde_json::from_str::<Graph>(r#"{"nodes_num":3,"distance":[]}"#);
        assert!(short.is_err());

        let graph: Graph =
            serde_json::from_str(r#"{"nodes_num":2,"distance":[0.0,4.0,4.0,0.0]}"#).unwrap();
        assert_eq!(graph.tour_length(&[0, 1]), 8.0);

        let json = serde_json::to_string(&graph).unwrap();
        assert_eq!(serde_json::from_str::<Graph>(&json).unwrap(), graph);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_lower_diagonal("/no/such/instance.tsp"),
            Err(SolverError::Io(_))
        ));
    }
}
