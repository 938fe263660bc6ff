use biasedga::{
    caching::{CacheKey, CachedEvaluator, ThreadLocalCachedEvaluator},
    error::Result,
    evolution::{Evaluator, SilentObserver, Solver, SolverOptions},
    tsp::{parse_lower_diagonal, Graph, PermutationKeyEvaluator, PermutationKeyGenerator, PermutationTour},
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

// Wraps an evaluator and counts how often it is actually asked.
#[derive(Clone)]
struct CountingEvaluator {
    inner: PermutationKeyEvaluator,
    evaluations: Arc<AtomicUsize>,
}

impl CountingEvaluator {
    fn new(graph: Arc<Graph>) -> Self {
        Self {
            inner: PermutationKeyEvaluator::new(graph),
            evaluations: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
}

impl Evaluator<PermutationTour> for CountingEvaluator {
    fn fitness_of(&self, solution: &PermutationTour) -> Result<f64> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        // Simulate an expensive computation
        std::thread::sleep(std::time::Duration::from_millis(1));
        self.inner.fitness_of(solution)
    }
}

fn square() -> Arc<Graph> {
    Arc::new(parse_lower_diagonal("4 0 1 0 2 1 0 1 2 1 0").unwrap())
}

fn options() -> SolverOptions {
    // A strong bias on a tiny instance keeps reproducing the same tours.
    SolverOptions::builder()
        .population_size(40)
        .elite_share(0.2)
        .new_individuals_share(0.1)
        .bias(0.9)
        .max_generations(30)
        .seed(21)
        .build()
        .unwrap()
}

#[test]
fn test_direct_caching() {
    let counting = CountingEvaluator::new(square());
    let cached = CachedEvaluator::new(counting.clone());

    let tour = PermutationTour::new(vec![0, 1, 0, 0, 2, 3, 1, 1]);
    let first = cached.fitness_of(&tour).unwrap();
    let second = cached.fitness_of(&tour.clone()).unwrap();

    assert_eq!(first, second);
    assert_eq!(counting.evaluations(), 1);
    assert_eq!(cached.cache_size().unwrap(), 1);
    assert_eq!(
        cached.get_cache().unwrap().get(&tour.cache_key()),
        Some(&first)
    );
}

#[test]
fn test_shared_cache_inside_solver() {
    let graph = square();
    let counting = CountingEvaluator::new(Arc::clone(&graph));
    let cached = CachedEvaluator::new(counting.clone());
    let probe = cached.clone();

    let mut solver: Solver<PermutationTour, _, _, _> = Solver::new(
        options(),
        PermutationKeyGenerator::new(&graph),
        cached,
        SilentObserver,
    )
    .unwrap();

    let best = solver.solve().unwrap();

    // 40 initial individuals plus 32 new ones per generation.
    let requested = 40 + 30 * 32;
    assert!(counting.evaluations() < requested);
    // Two workers can miss on the same tour at once and both evaluate it.
    assert!(probe.cache_size().unwrap() <= counting.evaluations());
    assert_eq!(best.fitness(), 4.0);
}

#[test]
fn test_thread_local_cache_inside_solver() {
    let graph = square();
    let counting = CountingEvaluator::new(Arc::clone(&graph));

    let mut solver: Solver<PermutationTour, _, _, _> = Solver::new(
        options(),
        PermutationKeyGenerator::new(&graph),
        ThreadLocalCachedEvaluator::new(counting.clone()),
        SilentObserver,
    )
    .unwrap();

    let best = solver.solve().unwrap();

    assert!(counting.evaluations() < 40 + 30 * 32);
    assert_eq!(best.fitness(), 4.0);
}

#[test]
fn test_cached_results_match_uncached() {
    let graph = square();
    let plain = PermutationKeyEvaluator::new(Arc::clone(&graph));
    let cached = CachedEvaluator::new(plain.clone());

    for transpositions in [
        vec![0, 0, 0, 0, 0, 0, 0, 0],
        vec![1, 2, 0, 0, 0, 0, 0, 0],
        vec![3, 0, 2, 1, 0, 1, 3, 3],
    ] {
        let tour = PermutationTour::new(transpositions);
        let expected = plain.fitness_of(&tour).unwrap();
        assert_eq!(cached.fitness_of(&tour).unwrap(), expected);
        assert_eq!(cached.fitness_of(&tour).unwrap(), expected);
    }
}
