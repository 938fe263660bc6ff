//! # SolverOptions
//!
//! The `SolverOptions` struct holds the immutable parameters of a biased
//! genetic algorithm run: how large the population is, how it is split into
//! elites, fresh mutants and crossover children, how strongly crossover favours
//! the elite parent, and when the run stops.
//!
//! Options are only obtainable through validation, so a `SolverOptions` value
//! is always consistent: fractions lie in `[0, 1]`, the elite and mutant shares
//! sum to at most one and every termination threshold is positive.
//!
//! ## Example
//!
//! ```rust
//! use biasedga::evolution::options::SolverOptions;
//!
//! let options = SolverOptions::builder()
//!     .population_size(150)
//!     .elite_share(0.1)
//!     .new_individuals_share(0.1)
//!     .bias(0.7)
//!     .timeout_s(60)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.elite_size(), 15);
//! assert_eq!(options.reseed_size(), 15);
//! assert_eq!(options.crossover_size(), 120);
//!
//! let rejected = SolverOptions::builder()
//!     .elite_share(0.6)
//!     .new_individuals_share(0.6)
//!     .build();
//! assert!(rejected.is_err());
//! ```
//!
//! ## Defaults
//!
//! | option                           | default   |
//! |----------------------------------|-----------|
//! | `population_size`                | 100       |
//! | `elite_share`                    | 0.1       |
//! | `new_individuals_share`          | 0.1       |
//! | `bias`                           | 0.7       |
//! | `max_generations`                | unbounded |
//! | `max_generations_no_improvement` | unbounded |
//! | `timeout_s`                      | unbounded |
//! | `num_workers`                    | 4         |
//! | `seed`                           | entropy   |

use std::time::Duration;

use crate::error::{Result, SolverError};

pub const DEFAULT_POPULATION_SIZE: usize = 100;
pub const DEFAULT_ELITE_SHARE: f64 = 0.1;
pub const DEFAULT_NEW_INDIVIDUALS_SHARE: f64 = 0.1;
pub const DEFAULT_BIAS: f64 = 0.7;
pub const DEFAULT_NUM_WORKERS: usize = 4;

/// Validated parameters of a solver run.
///
/// With the `serde` feature, deserialized options pass the same validation as
/// [`SolverOptionsBuilder::build`]; missing fields take their defaults.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "UncheckedOptions"))]
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOptions {
    population_size: usize,
    elite_share: f64,
    new_individuals_share: f64,
    /// Probability of inheriting each unit from the elite parent.
    bias: f64,
    max_generations: Option<usize>,
    max_generations_no_improvement: Option<usize>,
    timeout_s: Option<u64>,
    /// Size of the bounded worker pool shared by the whole solve.
    num_workers: usize,
    seed: Option<u64>,
}

impl SolverOptions {
    /// Returns a builder preloaded with the default parameters.
    pub fn builder() -> SolverOptionsBuilder {
        SolverOptionsBuilder::default()
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_elite_share(&self) -> f64 {
        self.elite_share
    }

    pub fn get_new_individuals_share(&self) -> f64 {
        self.new_individuals_share
    }

    pub fn get_bias(&self) -> f64 {
        self.bias
    }

    /// `None` means unbounded.
    pub fn get_max_generations(&self) -> Option<usize> {
        self.max_generations
    }

    /// `None` means unbounded.
    pub fn get_max_generations_no_improvement(&self) -> Option<usize> {
        self.max_generations_no_improvement
    }

    /// `None` means unbounded.
    pub fn get_timeout_s(&self) -> Option<u64> {
        self.timeout_s
    }

    /// The wall-clock timeout as a `Duration`, if any.
    pub fn get_timeout(&self) -> Option<Duration> {
        self.timeout_s.map(Duration::from_secs)
    }

    pub fn get_num_workers(&self) -> usize {
        self.num_workers
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of elites copied forward each generation:
    /// `floor(population_size * elite_share)`.
    pub fn elite_size(&self) -> usize {
        share_of(self.population_size, self.elite_share)
    }

    /// Number of fresh random individuals injected each generation:
    /// `floor(population_size * new_individuals_share)`.
    pub fn reseed_size(&self) -> usize {
        share_of(self.population_size, self.new_individuals_share)
    }

    /// Number of slots left for crossover children once elites and mutants are in.
    pub fn crossover_size(&self) -> usize {
        self.population_size
            .saturating_sub(self.elite_size() + self.reseed_size())
    }

    fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(invalid("population_size must be positive".to_string()));
        }

        check_fraction("elite_share", self.elite_share)?;
        check_fraction("new_individuals_share", self.new_individuals_share)?;
        check_fraction("bias", self.bias)?;

        if self.elite_share + self.new_individuals_share > 1.0 {
            return Err(invalid(format!(
                "elite_share ({}) + new_individuals_share ({}) must not exceed 1",
                self.elite_share, self.new_individuals_share
            )));
        }

        check_positive("max_generations", self.max_generations)?;
        check_positive(
            "max_generations_no_improvement",
            self.max_generations_no_improvement,
        )?;
        check_positive("timeout_s", self.timeout_s)?;

        if self.num_workers == 0 {
            return Err(invalid("num_workers must be positive".to_string()));
        }

        // Rounding down both shares can never overshoot the population.
        debug_assert!(self.elite_size() + self.reseed_size() <= self.population_size);

        if self.crossover_size() > 0 && self.elite_size() == 0 {
            return Err(invalid(format!(
                "elite_share ({}) yields no elite individuals out of {}, but {} crossover children need an elite parent",
                self.elite_share,
                self.population_size,
                self.crossover_size()
            )));
        }

        Ok(())
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            elite_share: DEFAULT_ELITE_SHARE,
            new_individuals_share: DEFAULT_NEW_INDIVIDUALS_SHARE,
            bias: DEFAULT_BIAS,
            max_generations: None,
            max_generations_no_improvement: None,
            timeout_s: None,
            num_workers: DEFAULT_NUM_WORKERS,
            seed: None,
        }
    }
}

/// Options as read from a serialized form, before validation.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default)]
struct UncheckedOptions {
    population_size: usize,
    elite_share: f64,
    new_individuals_share: f64,
    bias: f64,
    max_generations: Option<usize>,
    max_generations_no_improvement: Option<usize>,
    timeout_s: Option<u64>,
    num_workers: usize,
    seed: Option<u64>,
}

#[cfg(feature = "serde")]
impl Default for UncheckedOptions {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            elite_share: DEFAULT_ELITE_SHARE,
            new_individuals_share: DEFAULT_NEW_INDIVIDUALS_SHARE,
            bias: DEFAULT_BIAS,
            max_generations: None,
            max_generations_no_improvement: None,
            timeout_s: None,
            num_workers: DEFAULT_NUM_WORKERS,
            seed: None,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedOptions> for SolverOptions {
    type Error = SolverError;

    fn try_from(raw: UncheckedOptions) -> Result<Self> {
        let options = SolverOptions {
            population_size: raw.population_size,
            elite_share: raw.elite_share,
            new_individuals_share: raw.new_individuals_share,
            bias: raw.bias,
            max_generations: raw.max_generations,
            max_generations_no_improvement: raw.max_generations_no_improvement,
            timeout_s: raw.timeout_s,
            num_workers: raw.num_workers,
            seed: raw.seed,
        };
        options.validate()?;
        Ok(options)
    }
}

fn share_of(population_size: usize, share: f64) -> usize {
    (population_size as f64 * share).floor() as usize
}

fn invalid(msg: String) -> SolverError {
    SolverError::InvalidConfiguration(msg)
}

fn check_fraction(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(format!("{} ({}) must lie in [0, 1]", name, value)));
    }
    Ok(())
}

fn check_positive<T>(name: &str, value: Option<T>) -> Result<()>
where
    T: Default + PartialEq,
{
    match value {
        Some(v) if v == T::default() => Err(invalid(format!(
            "{} must be positive when bounded",
            name
        ))),
        _ => Ok(()),
    }
}

/// Builder for `SolverOptions`.
///
/// Provides a fluent interface; nothing is checked until [`SolverOptionsBuilder::build`].
#[derive(Debug, Clone)]
pub struct SolverOptionsBuilder {
    options: SolverOptions,
}

impl Default for SolverOptionsBuilder {
    fn default() -> Self {
        Self {
            options: SolverOptions::default(),
        }
    }
}

impl SolverOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.options.population_size = value;
        self
    }

    pub fn elite_share(mut self, value: f64) -> Self {
        self.options.elite_share = value;
        self
    }

    pub fn new_individuals_share(mut self, value: f64) -> Self {
        self.options.new_individuals_share = value;
        self
    }

    pub fn bias(mut self, value: f64) -> Self {
        self.options.bias = value;
        self
    }

    pub fn max_generations(mut self, value: usize) -> Self {
        self.options.max_generations = Some(value);
        self
    }

    pub fn max_generations_no_improvement(mut self, value: usize) -> Self {
        self.options.max_generations_no_improvement = Some(value);
        self
    }

    pub fn timeout_s(mut self, value: u64) -> Self {
        self.options.timeout_s = Some(value);
        self
    }

    pub fn num_workers(mut self, value: usize) -> Self {
        self.options.num_workers = value;
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.options.seed = Some(value);
        self
    }

    /// Validates and builds the `SolverOptions` instance.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidConfiguration`] if any share lies outside
    /// `[0, 1]`, the elite and new-individual shares sum above one, the
    /// population is empty, a bounded termination threshold or the worker count
    /// is zero, or crossover slots remain without any elite parent to draw.
    pub fn build(self) -> Result<SolverOptions> {
        self.options.validate()?;
        Ok(self.options)
    }
}
