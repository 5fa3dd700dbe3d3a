//! GA-based route-to-driver assignment.
//!
//! # Encoding
//!
//! An individual is a total mapping route → driver, stored as one
//! [`RouteAssignment`] per route in ascending route-ID order. Every
//! operator preserves coverage: each input route appears exactly once.
//!
//! # Submodules
//!
//! - [`operators`]: ranking, elitist truncation selection, mutation strategy
//!
//! # Loop
//!
//! Random initial population → for each generation: evaluate, rank, keep
//! elites, refill with mutated uniform-crossover children → return the
//! first individual of maximum fitness.

mod chromosome;
pub mod operators;
mod problem;
mod runner;

pub use chromosome::{
    first_hit_swap_mutation, per_position_swap_mutation, uniform_crossover, RosterChromosome,
    RouteAssignment,
};
pub use problem::{FitnessBreakdown, FitnessWeights, RosterProblem};
pub use runner::{GaConfig, GaResult, GaRunner};
