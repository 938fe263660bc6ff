//! # CsvObserver
//!
//! An observer that logs the best fitness to CSV every so many generations.
//!
//! ```rust
//! use biasedga::evolution::csv_observer::CsvObserver;
//!
//! let observer = CsvObserver::new(Vec::new(), 1000).unwrap();
//! assert_eq!(observer.get_ref(), b"generation,elapsed_s,best_fitness\n");
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::{
    error::{OptionExt, Result, SolverError},
    evolution::observer::{Observer, SolverState},
    solution::Solution,
};

pub const DEFAULT_CSV_CADENCE: usize = 1000;

const HEADER: &str = "generation,elapsed_s,best_fitness";

/// Writes `generation,elapsed_s,best_fitness` rows to any writer.
#[derive(Debug)]
pub struct CsvObserver<W: Write> {
    writer: W,
    every_n_generations: usize,
}

impl CsvObserver<BufWriter<File>> {
    /// Creates (or truncates) the file at `path` and writes the header.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Io`] if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P, every_n_generations: usize) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        Self::new(BufWriter::new(file), every_n_generations)
    }

    /// Like [`CsvObserver::create`], logging every [`DEFAULT_CSV_CADENCE`] generations.
    pub fn create_with_default_cadence<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::create(path, DEFAULT_CSV_CADENCE)
    }
}

impl<W: Write> CsvObserver<W> {
    /// Wraps `writer` and writes the header.
    pub fn new(mut writer: W, every_n_generations: usize) -> Result<Self> {
        writeln!(writer, "{}", HEADER)?;
        Ok(Self {
            writer,
            every_n_generations,
        })
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_row<S>(
        &mut self,
        state: &SolverState<'_, S>,
        generation: usize,
        elapsed_seconds: f64,
    ) -> Result<()> {
        let best = state
            .best_fitness()
            .ok_or_else_solver(|| SolverError::EmptyPopulation)?;
        writeln!(self.writer, "{},{},{}", generation, elapsed_seconds, best)
            .map_err(|e| write_failed(generation, e))
    }
}

impl<S, W> Observer<S> for CsvObserver<W>
where
    S: Solution,
    W: Write,
{
    fn observe_every_n_generations(&self) -> Option<usize> {
        Some(self.every_n_generations)
    }

    fn on_interval(
        &mut self,
        state: &SolverState<'_, S>,
        generation: usize,
        elapsed_seconds: f64,
    ) -> Result<()> {
        self.write_row(state, generation, elapsed_seconds)
    }

    fn on_finish(
        &mut self,
        state: &SolverState<'_, S>,
        generation: usize,
        total_elapsed_seconds: f64,
    ) -> Result<()> {
        self.write_row(state, generation, total_elapsed_seconds)?;
        self.writer
            .flush()
            .map_err(|e| write_failed(generation, e))?;
        info!(generation, total_elapsed_seconds, "CSV log closed");
        Ok(())
    }
}

fn write_failed(generation: usize, e: std::io::Error) -> SolverError {
    SolverError::Observer(format!(
        "failed to write CSV row for generation {}: {}",
        generation, e
    ))
}
