//! Run configuration.
//!
//! [`RunConfig`] holds every parameter of one engine run. The four operator
//! parameters that stagnation reform may change during a run are split
//! out into [`OperatorParams`].

use crate::error::{Result, TimetableError};

/// Ceiling for crossover probability raised by reform.
pub const MAX_REFORM_CROSSOVER: f64 = 95.0;

/// Ceiling for mutation probability raised by reform.
pub const MAX_REFORM_MUTATION: f64 = 30.0;

/// Operator parameters handed to strategies each generation.
///
/// Probabilities use a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperatorParams {
    /// Cut points per crossover.
    pub crossover_points: usize,
    /// Classes moved per mutation.
    pub mutation_size: usize,
    /// Chance that crossover recombines (0–100).
    pub crossover_probability: f64,
    /// Chance that mutation fires (0–100).
    pub mutation_probability: f64,
}

impl OperatorParams {
    /// Baseline reform step.
    ///
    /// Raises crossover probability by one point up to
    /// [`MAX_REFORM_CROSSOVER`]; once saturated, raises mutation probability
    /// by one point up to [`MAX_REFORM_MUTATION`]. Returns `false` when both
    /// are saturated and nothing changed.
    pub fn boost(&mut self) -> bool {
        if self.crossover_probability < MAX_REFORM_CROSSOVER {
            self.crossover_probability = (self.crossover_probability + 1.0).min(MAX_REFORM_CROSSOVER);
            true
        } else if self.mutation_probability < MAX_REFORM_MUTATION {
            self.mutation_probability = (self.mutation_probability + 1.0).min(MAX_REFORM_MUTATION);
            true
        } else {
            false
        }
    }
}

/// Configuration for one engine run.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::RunConfig;
///
/// let config = RunConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.crossover_points, 2);
/// assert_eq!(config.max_generations, 5000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::RunConfig;
///
/// let config = RunConfig::default()
///     .with_population_size(50)
///     .with_crossover_probability(90.0)
///     .with_min_fitness(0.99)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Number of individuals per generation (at least 2).
    pub population_size: usize,

    /// Cut points per crossover.
    pub crossover_points: usize,

    /// Classes moved per mutation.
    pub mutation_size: usize,

    /// Initial crossover probability, 0–100.
    pub crossover_probability: f64,

    /// Initial mutation probability, 0–100.
    pub mutation_probability: f64,

    /// Stagnation budget. Reform fires once the number of generations
    /// without improvement exceeds `max_repeat / reform_divisor`.
    pub max_repeat: usize,

    /// The run stops as soon as the best fitness strictly exceeds this.
    pub min_fitness: f64,

    /// Generation cap.
    pub max_generations: usize,

    /// Divisor applied to `max_repeat` for the reform threshold.
    ///
    /// The baseline uses 100; more aggressive variants use 50 or 15.
    pub reform_divisor: usize,

    /// Seed for the run's generator. `None` draws a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock limit in milliseconds, checked once per
    /// generation.
    pub time_limit_ms: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            crossover_points: 2,
            mutation_size: 2,
            crossover_probability: 80.0,
            mutation_probability: 3.0,
            max_repeat: 9999,
            min_fitness: 0.999,
            max_generations: 5000,
            reform_divisor: 100,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl RunConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of crossover points.
    pub fn with_crossover_points(mut self, n: usize) -> Self {
        self.crossover_points = n;
        self
    }

    /// Sets the mutation size.
    pub fn with_mutation_size(mut self, n: usize) -> Self {
        self.mutation_size = n;
        self
    }

    /// Sets the crossover probability (clamped to 0–100).
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p.clamp(0.0, 100.0);
        self
    }

    /// Sets the mutation probability (clamped to 0–100).
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p.clamp(0.0, 100.0);
        self
    }

    /// Sets the stagnation budget.
    pub fn with_max_repeat(mut self, n: usize) -> Self {
        self.max_repeat = n;
        self
    }

    /// Sets the termination threshold.
    pub fn with_min_fitness(mut self, fitness: f64) -> Self {
        self.min_fitness = fitness;
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the reform divisor.
    pub fn with_reform_divisor(mut self, divisor: usize) -> Self {
        self.reform_divisor = divisor;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Number of stagnant generations that must be exceeded before reform.
    pub fn reform_threshold(&self) -> usize {
        self.max_repeat / self.reform_divisor.max(1)
    }

    /// Initial operator parameters.
    pub fn operator_params(&self) -> OperatorParams {
        OperatorParams {
            crossover_points: self.crossover_points,
            mutation_size: self.mutation_size,
            crossover_probability: self.crossover_probability,
            mutation_probability: self.mutation_probability,
        }
    }

    /// Preset for small instances: quick feedback.
    ///
    /// - Population: 50, Generations: 500, Max repeat: 1000, Time limit: 10s
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            max_generations: 500,
            max_repeat: 1000,
            time_limit_ms: Some(10_000),
            ..Self::default()
        }
    }

    /// Preset balancing quality and time.
    ///
    /// - Population: 100, Generations: 2000, Max repeat: 5000, Time limit: 30s
    pub fn balanced() -> Self {
        Self {
            population_size: 100,
            max_generations: 2000,
            max_repeat: 5000,
            time_limit_ms: Some(30_000),
            ..Self::default()
        }
    }

    /// Preset for large instances.
    ///
    /// - Population: 150, Generations: 5000, Max repeat: 9999, Time limit: 60s
    pub fn quality() -> Self {
        Self {
            population_size: 150,
            max_generations: 5000,
            max_repeat: 9999,
            time_limit_ms: Some(60_000),
            ..Self::default()
        }
    }

    /// Picks a preset from the number of classes to place.
    ///
    /// - `class_count < 50` → [`fast()`](Self::fast)
    /// - `50 ≤ class_count < 200` → [`balanced()`](Self::balanced)
    /// - `class_count ≥ 200` → [`quality()`](Self::quality)
    pub fn auto_select(class_count: usize) -> Self {
        if class_count < 50 {
            Self::fast()
        } else if class_count < 200 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::InvalidParameter`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(TimetableError::parameter(
                "population_size",
                "must be at least 2",
            ));
        }
        if self.max_generations == 0 {
            return Err(TimetableError::parameter(
                "max_generations",
                "must be at least 1",
            ));
        }
        if self.reform_divisor == 0 {
            return Err(TimetableError::parameter("reform_divisor", "must be positive"));
        }
        if !(0.0..=100.0).contains(&self.crossover_probability) {
            return Err(TimetableError::parameter(
                "crossover_probability",
                format!("{} outside 0..=100", self.crossover_probability),
            ));
        }
        if !(0.0..=100.0).contains(&self.mutation_probability) {
            return Err(TimetableError::parameter(
                "mutation_probability",
                format!("{} outside 0..=100", self.mutation_probability),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_fitness) {
            return Err(TimetableError::parameter(
                "min_fitness",
                format!("{} outside 0..=1", self.min_fitness),
            ));
        }
        if self.time_limit_ms == Some(0) {
            return Err(TimetableError::parameter(
                "time_limit_ms",
                "must be positive or None",
            ));
        }
        Ok(())
    }
}
