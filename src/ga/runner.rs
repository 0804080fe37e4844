//! Evolutionary loop execution.
//!
//! [`Engine`] drives a [`Strategy`] over a population of chromosomes:
//! initialization → {track best → stagnation/reform → reproduce → replace}
//! → repeat until termination.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use super::config::{OperatorParams, RunConfig};
use super::strategy::Strategy;
use super::types::Chromosome;
use crate::error::{Result, TimetableError};
use crate::random::{create_rng, reseed};

/// Best-fitness changes at or below this count as no improvement.
const STAGNATION_EPSILON: f64 = 1e-6;

/// Result of one engine run.
#[derive(Debug, Clone)]
pub struct RunResult<C: Chromosome> {
    /// The best individual seen during the entire run.
    pub best: C,

    /// Same as `best.fitness()`.
    pub best_fitness: f64,

    /// Generations executed.
    pub generations: usize,

    /// Whether the best fitness exceeded `min_fitness`.
    pub converged: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the wall-clock limit was hit.
    pub timed_out: bool,

    /// Number of reform steps applied.
    pub reforms: usize,

    /// Operator parameters in effect at termination.
    pub final_params: OperatorParams,

    /// Best fitness before the first generation and after each one.
    pub fitness_history: Vec<f64>,
}

/// Counts consecutive generations without best-fitness improvement.
#[derive(Debug, Clone, Default)]
struct Stagnation {
    last: Option<f64>,
    counter: usize,
}

impl Stagnation {
    fn observe(&mut self, best: f64) {
        match self.last {
            Some(last) if (best - last).abs() <= STAGNATION_EPSILON => self.counter += 1,
            _ => {
                self.last = Some(best);
                self.counter = 0;
            }
        }
    }

    /// Returns `true` once per crossing of `threshold` and restarts the count.
    fn exceeded(&mut self, threshold: usize) -> bool {
        if self.counter > threshold {
            self.counter = 0;
            true
        } else {
            false
        }
    }

    /// Percentage of the stagnation budget already used.
    fn ratio(&self, max_repeat: usize) -> f64 {
        self.counter as f64 * 100.0 / max_repeat.max(1) as f64
    }
}

/// Executes the evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_timetable::ga::{Engine, NsgaII, RunConfig};
/// use u_timetable::models::{ClassSpec, Configuration, Course, Professor, StudentsGroup};
/// use u_timetable::Schedule;
/// use std::sync::Arc;
///
/// let mut configuration = Configuration::new();
/// configuration.add_professor(Professor::new(1, "Ada"));
/// configuration.add_course(Course::new(1, "Algorithms"));
/// configuration.add_group(StudentsGroup::new(1, "CS-1", 20));
/// configuration.add_room("R1", false, 30);
/// configuration.add_class(ClassSpec::new(1, 1).with_group(1)).unwrap();
///
/// let prototype = Schedule::new(Arc::new(configuration)).unwrap();
/// let config = RunConfig::default().with_population_size(10).with_seed(42);
/// let result = Engine::run(&prototype, &mut NsgaII::new(), &config).unwrap();
/// assert!(result.converged);
/// ```
pub struct Engine;

impl Engine {
    /// Runs `strategy` from `prototype` until termination.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::InvalidParameter`] if `config` does not
    /// validate or the strategy seeds an empty population.
    pub fn run<C, S>(prototype: &C, strategy: &mut S, config: &RunConfig) -> Result<RunResult<C>>
    where
        C: Chromosome,
        S: Strategy<C>,
    {
        Self::run_with_cancel(prototype, strategy, config, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the run stops
    /// before the next generation and returns the best individual found so
    /// far. The time limit is checked at the same point.
    pub fn run_with_cancel<C, S>(
        prototype: &C,
        strategy: &mut S,
        config: &RunConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RunResult<C>>
    where
        C: Chromosome,
        S: Strategy<C>,
    {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = create_rng(seed);
        let started = Instant::now();
        let threshold = config.reform_threshold();
        let mut params = config.operator_params();

        info!(
            strategy = strategy.name(),
            population = config.population_size,
            seed,
            "starting run"
        );

        // 1. Initialize population
        let mut population = strategy.initialize(prototype, config.population_size, &mut rng);
        let mut best = strategy
            .best(&population)
            .cloned()
            .ok_or_else(|| TimetableError::parameter("population", "strategy seeded no individuals"))?;

        let mut fitness_history = Vec::with_capacity(config.max_generations.min(10_000) + 1);
        fitness_history.push(best.fitness());

        let mut stagnation = Stagnation::default();
        let mut generations = 0usize;
        let mut reforms = 0usize;
        let mut converged = false;
        let mut cancelled = false;
        let mut timed_out = false;

        // 2. Evolutionary loop
        loop {
            if best.fitness() > config.min_fitness {
                converged = true;
                info!(generations, fitness = best.fitness(), "converged");
                break;
            }
            if generations >= config.max_generations {
                break;
            }
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    info!(generations, "run cancelled");
                    break;
                }
            }
            if let Some(limit) = config.time_limit_ms {
                if started.elapsed().as_millis() >= u128::from(limit) {
                    timed_out = true;
                    info!(generations, limit_ms = limit, "time limit reached");
                    break;
                }
            }

            // Stagnation and reform
            stagnation.observe(best.fitness());
            debug!(
                generation = generations,
                fitness = best.fitness(),
                stagnant = stagnation.counter,
                repeat_ratio = stagnation.ratio(config.max_repeat),
                "generation"
            );
            if stagnation.exceeded(threshold) {
                strategy.reform(&mut params);
                reseed(&mut rng);
                reforms += 1;
                info!(
                    generation = generations,
                    crossover_probability = params.crossover_probability,
                    mutation_probability = params.mutation_probability,
                    "stagnation reform"
                );
            }

            // Reproduce and replace
            let offspring = strategy.reproduce(&population, &params, &mut rng);
            population = strategy.replace(population, offspring, config.population_size, &mut rng);
            generations += 1;

            if let Some(current) = strategy.best(&population) {
                if current.fitness() > best.fitness() {
                    best = current.clone();
                }
            }
            fitness_history.push(best.fitness());
        }

        info!(
            generations,
            fitness = best.fitness(),
            reforms,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "run finished"
        );

        Ok(RunResult {
            best_fitness: best.fitness(),
            best,
            generations,
            converged,
            cancelled,
            timed_out,
            reforms,
            final_params: params,
            fitness_history,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
