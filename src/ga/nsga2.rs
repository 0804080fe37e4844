//! NSGA-II baseline strategy.
//!
//! Each generation the population is shuffled and split into pairs; every
//! pair yields two children (each parent acts once as the primary parent)
//! which are then mutated. Parents and children are merged, ranked into
//! fronts and truncated back to the population size, filling whole fronts
//! first and breaking the overflowing front by diversity.
//!
//! # Ranking
//!
//! [`Objective::Fitness`] compares scalar fitness: strictly greater fitness
//! dominates, so fronts are fitness-equivalence classes. Since every member
//! of such a front has the same objective value, the overflowing front is
//! thinned by [`Chromosome::difference`] instead, keeping the members
//! farthest from their nearest neighbour.
//!
//! [`Objective::Pareto`] compares the objective vectors reported by
//! [`Chromosome::objectives`] with true Pareto dominance and truncates by
//! crowding distance.
//!
//! # Reference
//!
//! Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"

use rand::seq::SliceRandom;
use rand::Rng;

use super::config::OperatorParams;
use super::multi_objective::{
    environmental_selection, environmental_selection_by, fitness_sort, non_dominated_sort_by,
    pareto_dominance, truncate_by_distance, NondominatedSortResult,
};
use super::strategy::Strategy;
use super::types::Chromosome;

/// Dominance relation used to rank the merged population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Objective {
    /// Scalar fitness, higher dominates.
    #[default]
    Fitness,
    /// Pareto dominance over the minimized objective vector.
    Pareto,
}

/// NSGA-II with pairwise reproduction and diversity-based front truncation.
///
/// # Example
///
/// ```
/// use u_timetable::ga::{Objective, NsgaII, Strategy};
/// use u_timetable::Schedule;
///
/// let strategy = NsgaII::new().with_objective(Objective::Pareto);
/// assert_eq!(Strategy::<Schedule>::name(&strategy), "nsga2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NsgaII {
    objective: Objective,
}

impl NsgaII {
    /// Scalar-fitness NSGA-II.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the dominance relation.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// The dominance relation in use.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    fn objective_vectors<C: Chromosome>(&self, population: &[C]) -> Vec<Vec<f64>> {
        match self.objective {
            Objective::Fitness => population.iter().map(|c| vec![-c.fitness()]).collect(),
            Objective::Pareto => population.iter().map(|c| c.objectives()).collect(),
        }
    }

    /// Sorts `population` into fronts under the configured relation.
    pub fn rank<C: Chromosome>(&self, population: &[C]) -> NondominatedSortResult {
        match self.objective {
            Objective::Fitness => {
                let fitness: Vec<f64> = population.iter().map(|c| c.fitness()).collect();
                fitness_sort(&fitness)
            }
            Objective::Pareto => {
                let objectives = self.objective_vectors(population);
                non_dominated_sort_by(population.len(), |i, j| {
                    pareto_dominance(&objectives[i], &objectives[j])
                })
            }
        }
    }

    /// Indices of the `target` survivors of `population`, best front first.
    pub fn select<C: Chromosome>(&self, population: &[C], target: usize) -> Vec<usize> {
        let sorted = self.rank(population);
        match self.objective {
            Objective::Fitness => environmental_selection_by(&sorted, target, |front, keep| {
                truncate_by_distance(front, keep, |i, j| population[i].difference(&population[j]))
            }),
            Objective::Pareto => {
                let objectives = self.objective_vectors(population);
                environmental_selection(&sorted, &objectives, target)
            }
        }
    }
}

impl<C: Chromosome> Strategy<C> for NsgaII {
    fn name(&self) -> &'static str {
        "nsga2"
    }

    fn reproduce<R: Rng>(&mut self, population: &[C], params: &OperatorParams, rng: &mut R) -> Vec<C> {
        let mut order: Vec<usize> = (0..population.len()).collect();
        order.shuffle(rng);

        let mut offspring = Vec::with_capacity(order.len());
        for pair in order.chunks_exact(2) {
            let father = &population[pair[0]];
            let mother = &population[pair[1]];
            offspring.push(father.crossover(
                mother,
                params.crossover_points,
                params.crossover_probability,
                rng,
            ));
            offspring.push(mother.crossover(
                father,
                params.crossover_points,
                params.crossover_probability,
                rng,
            ));
        }

        for child in &mut offspring {
            child.mutation(params.mutation_size, params.mutation_probability, rng);
        }
        offspring
    }

    fn replace<R: Rng>(
        &mut self,
        population: Vec<C>,
        offspring: Vec<C>,
        population_size: usize,
        _rng: &mut R,
    ) -> Vec<C> {
        let mut merged = population;
        merged.extend(offspring);

        let selected = self.select(&merged, population_size);
        let mut slots: Vec<Option<C>> = merged.into_iter().map(Some).collect();
        selected
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect()
    }
}
