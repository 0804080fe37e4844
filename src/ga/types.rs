//! Core trait definitions for the evolutionary framework.
//!
//! [`Chromosome`] is the contract between the engine (and every
//! [`Strategy`](super::Strategy)) and a candidate solution. Strategies are
//! written purely against it and never reach into the concrete encoding.

use rand::Rng;

use super::multi_objective::{pareto_dominance, Dominance};

/// A candidate solution that knows how to reproduce itself.
///
/// Fitness is **maximized** and lies in `[0, 1]`. Objectives, when a
/// strategy asks for them, are **minimized**.
///
/// All randomness comes from the `rng` argument; implementations must not
/// use a global generator.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct Bits { genes: Vec<bool>, fitness: f64 }
///
/// impl Chromosome for Bits {
///     type Configuration = usize;
///     fn make_new_from_prototype<R: Rng>(&self, rng: &mut R) -> Self { /* ... */ }
///     fn crossover<R: Rng>(&self, mother: &Self, points: usize, p: f64, rng: &mut R) -> Self { /* ... */ }
///     fn mutation<R: Rng>(&mut self, size: usize, p: f64, rng: &mut R) { /* ... */ }
///     fn fitness(&self) -> f64 { self.fitness }
///     fn configuration(&self) -> &usize { &self.len }
///     fn difference(&self, other: &Self) -> usize { /* hamming */ }
/// }
/// ```
pub trait Chromosome: Clone + Send + Sync {
    /// Problem instance the chromosome is built for.
    type Configuration;

    /// Creates a new random individual sharing this one's configuration.
    fn make_new_from_prototype<R: Rng>(&self, rng: &mut R) -> Self;

    /// Produces one child with `self` as primary and `mother` as secondary
    /// parent.
    ///
    /// `crossover_probability` is on a 0–100 scale; when recombination is
    /// skipped the child is a copy of `self`.
    fn crossover<R: Rng>(
        &self,
        mother: &Self,
        crossover_points: usize,
        crossover_probability: f64,
        rng: &mut R,
    ) -> Self;

    /// Perturbs the individual in place.
    ///
    /// `mutation_probability` is on a 0–100 scale.
    fn mutation<R: Rng>(&mut self, mutation_size: usize, mutation_probability: f64, rng: &mut R);

    /// Scalar fitness, higher is better.
    fn fitness(&self) -> f64;

    /// The problem instance.
    fn configuration(&self) -> &Self::Configuration;

    /// Structural distance to `other` (number of differing genes).
    fn difference(&self, other: &Self) -> usize;

    /// Objective vector for Pareto ranking, lower is better.
    ///
    /// Defaults to the negated fitness.
    fn objectives(&self) -> Vec<f64> {
        vec![-self.fitness()]
    }

    /// Pareto dominance over [`objectives`](Self::objectives).
    fn dominates(&self, other: &Self) -> bool {
        pareto_dominance(&self.objectives(), &other.objectives()) == Dominance::Left
    }

    /// Length of the real-valued position vector, 0 if unsupported.
    fn position_len(&self) -> usize {
        0
    }

    /// Flattens the individual into `positions`.
    fn extract_positions(&self, _positions: &mut [f32]) {}

    /// Rebuilds the individual from `positions`, writing back the values
    /// actually used.
    fn update_positions(&mut self, _positions: &mut [f32]) {}
}
