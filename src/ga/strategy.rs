//! Search strategy extension point.
//!
//! The [`Engine`](super::Engine) owns the generation loop, termination and
//! stagnation tracking. A [`Strategy`] supplies everything that differs
//! between metaheuristics: how the first population is seeded, how
//! offspring are produced, which individuals survive, and how operator
//! parameters are adjusted when the search stalls.
//!
//! Strategies only see individuals through the [`Chromosome`] contract, so
//! any strategy written here runs on any encoding.

use rand::Rng;

use super::config::OperatorParams;
use super::types::Chromosome;

/// A pluggable metaheuristic driven by the engine.
///
/// # Generation protocol
///
/// Each generation the engine calls [`reproduce`](Self::reproduce) with
/// the current population and operator parameters, then hands the
/// population and the offspring to [`replace`](Self::replace), which must
/// return the next population of exactly `population_size` individuals.
pub trait Strategy<C: Chromosome> {
    /// Short human-readable name used in log events.
    fn name(&self) -> &'static str;

    /// Seeds the first population.
    ///
    /// Defaults to `population_size` fresh random individuals.
    fn initialize<R: Rng>(&mut self, prototype: &C, population_size: usize, rng: &mut R) -> Vec<C> {
        (0..population_size)
            .map(|_| prototype.make_new_from_prototype(rng))
            .collect()
    }

    /// Produces offspring from `population`.
    ///
    /// Offspring are returned already mutated and evaluated.
    fn reproduce<R: Rng>(&mut self, population: &[C], params: &OperatorParams, rng: &mut R) -> Vec<C>;

    /// Builds the next population from the current one and its offspring.
    fn replace<R: Rng>(
        &mut self,
        population: Vec<C>,
        offspring: Vec<C>,
        population_size: usize,
        rng: &mut R,
    ) -> Vec<C>;

    /// Adjusts operator parameters after stagnation.
    ///
    /// Defaults to [`OperatorParams::boost`].
    fn reform(&mut self, params: &mut OperatorParams) {
        params.boost();
    }

    /// Best individual of `population`, `None` if it is empty.
    ///
    /// Defaults to the highest fitness; ties resolve to the first.
    fn best<'a>(&self, population: &'a [C]) -> Option<&'a C> {
        population.iter().reduce(|best, c| {
            if c.fitness() > best.fitness() {
                c
            } else {
                best
            }
        })
    }
}
