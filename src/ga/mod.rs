//! Evolutionary search framework.
//!
//! A fixed engine shell parametrized by a pluggable search strategy. The
//! engine owns the population loop, termination and stagnation-driven
//! reform; strategies decide how offspring are bred and who survives.
//!
//! # Core Traits
//!
//! - [`Chromosome`]: A candidate solution that can reproduce itself
//! - [`Strategy`]: A metaheuristic supplying initialize, reproduce, replace and reform
//!
//! # Key Types
//!
//! - [`RunConfig`]: Run parameters (population size, operator probabilities, presets)
//! - [`Engine`]: Executes the evolutionary loop
//! - [`RunResult`]: Best individual found plus run statistics
//!
//! # Strategies
//!
//! - [`NsgaII`]: Pairwise reproduction, non-dominated ranking and crowding truncation
//! - [`ElitistGa`]: Steady-state replacement with a protected best group
//!
//! # Submodules
//!
//! - [`multi_objective`]: Non-dominated sorting, crowding distance, environmental selection
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Deb et al. (2002), *A Fast and Elitist Multiobjective GA: NSGA-II*

mod config;
mod elitist;
pub mod multi_objective;
mod nsga2;
mod runner;
mod strategy;
mod types;

pub use config::{OperatorParams, RunConfig, MAX_REFORM_CROSSOVER, MAX_REFORM_MUTATION};
pub use elitist::ElitistGa;
pub use nsga2::{NsgaII, Objective};
pub use runner::{Engine, RunResult};
pub use strategy::Strategy;
pub use types::Chromosome;
