//! Steady-state elitist GA.
//!
//! Each generation a handful of offspring, bred from two uniformly drawn
//! parents, overwrite random members of the population. A small group of
//! the best individuals is tracked by index and protected from being
//! overwritten, so the best solution can never be lost.

use rand::Rng;

use super::config::OperatorParams;
use super::strategy::Strategy;
use super::types::Chromosome;

/// Ceiling for crossover probability raised by this strategy's reform.
const MAX_CROSSOVER: f64 = 100.0;

/// Steady-state GA with a protected best group.
///
/// # Example
///
/// ```
/// use u_timetable::ga::ElitistGa;
///
/// let strategy = ElitistGa::new().with_replace_by_generation(10).with_track_best(3);
/// assert_eq!(strategy.replace_by_generation(), 10);
/// assert_eq!(strategy.track_best(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ElitistGa {
    /// Configured values, restored at the start of every run.
    initial_replace_by_generation: usize,
    initial_track_best: usize,
    /// Working values, adjusted to the population and by reform.
    replace_by_generation: usize,
    track_best: usize,
    population_size: usize,
    /// Population indices of the best group, best first.
    best: Vec<usize>,
    flags: Vec<bool>,
}

impl Default for ElitistGa {
    fn default() -> Self {
        Self {
            initial_replace_by_generation: 8,
            initial_track_best: 5,
            replace_by_generation: 8,
            track_best: 5,
            population_size: 0,
            best: Vec::new(),
            flags: Vec::new(),
        }
    }
}

impl ElitistGa {
    /// Strategy replacing 8 individuals per generation and protecting 5.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of individuals replaced per generation.
    pub fn with_replace_by_generation(mut self, n: usize) -> Self {
        self.initial_replace_by_generation = n.max(1);
        self.replace_by_generation = self.initial_replace_by_generation;
        self
    }

    /// Sets the size of the protected best group.
    pub fn with_track_best(mut self, n: usize) -> Self {
        self.initial_track_best = n.max(1);
        self.track_best = self.initial_track_best;
        self
    }

    /// Individuals replaced per generation in the current run.
    pub fn replace_by_generation(&self) -> usize {
        self.replace_by_generation
    }

    /// Size of the protected best group in the current run.
    pub fn track_best(&self) -> usize {
        self.track_best
    }

    /// Population indices currently in the best group, best first.
    pub fn best_group(&self) -> &[usize] {
        &self.best
    }

    fn set_replace_by_generation(&mut self, n: usize) {
        let limit = self.population_size.saturating_sub(self.track_best).max(1);
        self.replace_by_generation = n.clamp(1, limit);
    }

    fn reset(&mut self, population_size: usize) {
        self.population_size = population_size;
        // at least one slot must stay open for replacement
        self.track_best = self
            .initial_track_best
            .min(population_size.saturating_sub(1))
            .max(1);
        self.set_replace_by_generation(self.initial_replace_by_generation);
        self.best.clear();
        self.flags = vec![false; population_size];
    }

    /// Tries to enter `index` into the best group.
    fn add_to_best<C: Chromosome>(&mut self, index: usize, population: &[C]) {
        if self.flags[index] {
            return;
        }
        let fitness = population[index].fitness();
        if let Some(&worst) = self.best.last() {
            if self.best.len() == self.track_best && population[worst].fitness() >= fitness {
                return;
            }
        }

        let at = self
            .best
            .iter()
            .position(|&b| population[b].fitness() < fitness)
            .unwrap_or(self.best.len());
        self.best.insert(at, index);
        self.flags[index] = true;

        if self.best.len() > self.track_best {
            if let Some(dropped) = self.best.pop() {
                self.flags[dropped] = false;
            }
        }
    }
}

impl<C: Chromosome> Strategy<C> for ElitistGa {
    fn name(&self) -> &'static str {
        "elitist-ga"
    }

    fn initialize<R: Rng>(&mut self, prototype: &C, population_size: usize, rng: &mut R) -> Vec<C> {
        self.reset(population_size);
        let population: Vec<C> = (0..population_size)
            .map(|_| prototype.make_new_from_prototype(rng))
            .collect();
        for i in 0..population.len() {
            self.add_to_best(i, &population);
        }
        population
    }

    fn reproduce<R: Rng>(&mut self, population: &[C], params: &OperatorParams, rng: &mut R) -> Vec<C> {
        if population.is_empty() {
            return Vec::new();
        }
        (0..self.replace_by_generation)
            .map(|_| {
                let father = &population[rng.random_range(0..population.len())];
                let mother = &population[rng.random_range(0..population.len())];
                let mut child = father.crossover(
                    mother,
                    params.crossover_points,
                    params.crossover_probability,
                    rng,
                );
                child.mutation(params.mutation_size, params.mutation_probability, rng);
                child
            })
            .collect()
    }

    fn replace<R: Rng>(
        &mut self,
        mut population: Vec<C>,
        offspring: Vec<C>,
        _population_size: usize,
        rng: &mut R,
    ) -> Vec<C> {
        if self.flags.len() != population.len() {
            self.reset(population.len());
            for i in 0..population.len() {
                self.add_to_best(i, &population);
            }
        }
        if population.len() <= self.best.len() {
            return population;
        }

        for child in offspring {
            let index = loop {
                let i = rng.random_range(0..population.len());
                if !self.flags[i] {
                    break i;
                }
            };
            population[index] = child;
            self.add_to_best(index, &population);
        }
        population
    }

    /// Triples the replacement rate and raises crossover probability by one
    /// point, up to 100.
    fn reform(&mut self, params: &mut OperatorParams) {
        self.set_replace_by_generation(self.replace_by_generation.saturating_mul(3));
        params.crossover_probability = (params.crossover_probability + 1.0).min(MAX_CROSSOVER);
    }

    fn best<'a>(&self, population: &'a [C]) -> Option<&'a C> {
        match self.best.first() {
            Some(&i) if i < population.len() => Some(&population[i]),
            _ => population.iter().reduce(|best, c| {
                if c.fitness() > best.fitness() {
                    c
                } else {
                    best
                }
            }),
        }
    }
}
