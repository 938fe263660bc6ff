use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use biasedga::{
    caching::CachedEvaluator,
    evolution::{SilentObserver, Solver, SolverOptions},
    rng::RandomNumberGenerator,
    tsp::{
        EuclideanGraphGenerator, Graph, PermutationKeyEvaluator, PermutationKeyGenerator,
        PermutationTour, RandomKeyEvaluator, RandomKeyGenerator, RandomKeyTour,
    },
};

fn graph(nodes_num: usize) -> Arc<Graph> {
    let mut rng = RandomNumberGenerator::from_seed(nodes_num as u64);
    Arc::new(EuclideanGraphGenerator::new(nodes_num, 1000.0).generate(&mut rng))
}

fn options(num_workers: usize) -> SolverOptions {
    SolverOptions::builder()
        .population_size(150)
        .elite_share(0.1)
        .new_individuals_share(0.1)
        .bias(0.7)
        .max_generations(50)
        .num_workers(num_workers)
        .seed(7)
        .build()
        .unwrap()
}

fn bench_encodings(c: &mut Criterion) {
    let mut group = c.benchmark_group("tsp_solve");
    group.sample_size(10);

    for nodes_num in [20, 50, 100].iter() {
        let graph = graph(*nodes_num);

        group.bench_with_input(BenchmarkId::new("random_key", nodes_num), &graph, |b, graph| {
            b.iter(|| {
                let mut solver: Solver<RandomKeyTour, _, _, _> = Solver::new(
                    options(4),
                    RandomKeyGenerator::new(graph),
                    RandomKeyEvaluator::new(Arc::clone(graph)),
                    SilentObserver,
                )
                .unwrap();
                black_box(solver.solve().unwrap())
            })
        });

        group.bench_with_input(BenchmarkId::new("permutation_key", nodes_num), &graph, |b, graph| {
            b.iter(|| {
                let mut solver: Solver<PermutationTour, _, _, _> = Solver::new(
                    options(4),
                    PermutationKeyGenerator::new(graph),
                    PermutationKeyEvaluator::new(Arc::clone(graph)),
                    SilentObserver,
                )
                .unwrap();
                black_box(solver.solve().unwrap())
            })
        });

        group.bench_with_input(BenchmarkId::new("permutation_key_cached", nodes_num), &graph, |b, graph| {
            b.iter(|| {
                let mut solver: Solver<PermutationTour, _, _, _> = Solver::new(
                    options(4),
                    PermutationKeyGenerator::new(graph),
                    CachedEvaluator::new(PermutationKeyEvaluator::new(Arc::clone(graph))),
                    SilentObserver,
                )
                .unwrap();
                black_box(solver.solve().unwrap())
            })
        });
    }

    group.finish();
}

fn bench_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_count");
    group.sample_size(10);
    let graph = graph(100);

    for num_workers in [1, 2, 4, 8].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_workers), num_workers, |b, &num_workers| {
            b.iter(|| {
                let mut solver: Solver<RandomKeyTour, _, _, _> = Solver::new(
                    options(num_workers),
                    RandomKeyGenerator::new(&graph),
                    RandomKeyEvaluator::new(Arc::clone(&graph)),
                    SilentObserver,
                )
                .unwrap();
                black_box(solver.solve().unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encodings, bench_workers);
criterion_main!(benches);
