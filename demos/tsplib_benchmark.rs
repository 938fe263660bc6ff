//! Compares the random-key and permutation-key encodings on TSPLib instances.
//!
//! ```text
//! cargo run --release --example tsplib_benchmark -- [instance_folder] [instance...]
//! ```
//!
//! Each instance is read from `<instance_folder>/<instance>.tsp`, which must
//! hold the node count followed by the `LOWER_DIAG_ROW` weights. Every
//! encoding is run five times per instance with a one minute timeout; each run
//! logs its progress to `<key>-<instance>-run-<n>-log.csv` and the averages go
//! to `results.csv`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use biasedga::{
    benchmark::{run_trials, TrialSummary},
    evolution::{CsvObserver, Solver, SolverOptions},
    tsp::{
        load_lower_diagonal, Graph, PermutationKeyEvaluator, PermutationKeyGenerator,
        PermutationTour, RandomKeyEvaluator, RandomKeyGenerator, RandomKeyTour,
    },
    Result,
};
use tracing::{info, Level};

const DEFAULT_INSTANCES: [&str; 7] = ["gr120", "gr17", "gr21", "gr24", "gr48", "hk48", "pa561"];
const INSTANCE_EXTENSION: &str = "tsp";
const RESULTS_FILE: &str = "results.csv";
const RERUNS: usize = 5;

fn options() -> Result<SolverOptions> {
    SolverOptions::builder()
        .population_size(150)
        .bias(0.7)
        .elite_share(0.1)
        .new_individuals_share(0.1)
        .timeout_s(60)
        .build()
}

fn log_path(key: &str, instance: &str, run: usize) -> PathBuf {
    PathBuf::from(format!("{}-{}-run-{}-log.csv", key, instance, run))
}

fn random_key_trials(graph: &Arc<Graph>, instance: &str) -> Result<TrialSummary> {
    run_trials(RERUNS, |run| {
        info!(instance, run, "Launching the random-key algorithm");
        let observer = CsvObserver::create_with_default_cadence(log_path("randomkey", instance, run))?;
        let mut solver: Solver<RandomKeyTour, _, _, _> = Solver::new(
            options()?,
            RandomKeyGenerator::new(graph),
            RandomKeyEvaluator::new(Arc::clone(graph)),
            observer,
        )?;
        Ok(solver.solve()?.fitness())
    })
}

fn permutation_key_trials(graph: &Arc<Graph>, instance: &str) -> Result<TrialSummary> {
    run_trials(RERUNS, |run| {
        info!(instance, run, "Launching the permutation-key algorithm");
        let observer = CsvObserver::create_with_default_cadence(log_path("permutationkey", instance, run))?;
        let mut solver: Solver<PermutationTour, _, _, _> = Solver::new(
            options()?,
            PermutationKeyGenerator::new(graph),
            PermutationKeyEvaluator::new(Arc::clone(graph)),
            observer,
        )?;
        Ok(solver.solve()?.fitness())
    })
}

fn write_row<W: Write>(out: &mut W, instance: &str, key: &str, summary: &TrialSummary) -> Result<()> {
    writeln!(out, "{},{},{},{}", instance, key, summary.mean, summary.std_dev)?;
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let mut args = std::env::args().skip(1);
    let folder = args.next().unwrap_or_else(|| "tsplib".to_string());
    let mut instances: Vec<String> = args.collect();
    if instances.is_empty() {
        instances = DEFAULT_INSTANCES.iter().map(|s| s.to_string()).collect();
    }

    let mut results = BufWriter::new(File::create(RESULTS_FILE)?);
    writeln!(results, "instance,key,avg,stddev")?;

    for instance in &instances {
        info!(instance = instance.as_str(), "Tests for instance");

        let path = Path::new(&folder).join(instance).with_extension(INSTANCE_EXTENSION);
        let graph = Arc::new(load_lower_diagonal(&path)?);

        let random = random_key_trials(&graph, instance)?;
        write_row(&mut results, instance, "random", &random)?;

        let permutation = permutation_key_trials(&graph, instance)?;
        write_row(&mut results, instance, "permutation", &permutation)?;
    }

    info!(results = RESULTS_FILE, "Benchmark finished");
    Ok(())
}
