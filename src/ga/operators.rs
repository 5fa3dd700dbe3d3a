//! Selection and reproduction for the rostering GA.
//!
//! One generation step:
//! 1. The ranked population (best first) keeps its top `size / elite_divisor`
//!    individuals unchanged.
//! 2. The rest is refilled with children. Each child has two parents drawn
//!    uniformly, with replacement, from the top `size / parent_pool_divisor`.
//!    It is produced by uniform crossover and then mutated.
//!
//! # Usage
//!
//! ```
//! use u_roster::ga::operators::MutationType;
//!
//! assert_eq!(MutationType::default(), MutationType::FirstHit);
//! ```

use std::cmp::Reverse;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::{
    first_hit_swap_mutation, per_position_swap_mutation, uniform_crossover, RosterChromosome,
};
use super::runner::GaConfig;

/// Mutation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationType {
    /// Scan positions; swap at the first coin-flip success and stop.
    /// At most one swap per child.
    #[default]
    FirstHit,
    /// Give every position its own swap chance. Much stronger pressure on
    /// large route sets.
    PerPosition,
}

impl MutationType {
    /// Applies this mutation to a chromosome.
    pub fn apply<R: Rng>(&self, chromosome: &mut RosterChromosome, probability: f64, rng: &mut R) {
        match self {
            MutationType::FirstHit => {
                first_hit_swap_mutation(chromosome, probability, rng);
            }
            MutationType::PerPosition => {
                per_position_swap_mutation(chromosome, probability, rng);
            }
        }
    }
}

/// Sorts a population best-first. Stable, so ties keep their order.
///
/// Unevaluated individuals sort last.
pub fn rank(population: &mut [RosterChromosome]) {
    population.sort_by_key(|c| Reverse(c.fitness));
}

/// Builds the next generation from a ranked population.
///
/// Elites are cloned with their cached fitness; children start unevaluated.
pub fn next_generation<R: Rng>(
    ranked: &[RosterChromosome],
    config: &GaConfig,
    rng: &mut R,
) -> Vec<RosterChromosome> {
    let size = config.population_size;
    let elite_count = (size / config.elite_divisor).min(ranked.len());
    let pool_size = (size / config.parent_pool_divisor).clamp(1, ranked.len().max(1));

    let mut next = Vec::with_capacity(size);
    next.extend_from_slice(&ranked[..elite_count]);

    if ranked.is_empty() {
        return next;
    }
    while next.len() < size {
        let p1 = &ranked[rng.random_range(0..pool_size)];
        let p2 = &ranked[rng.random_range(0..pool_size)];
        let mut child = uniform_crossover(p1, p2, rng);
        config
            .mutation_type
            .apply(&mut child, config.mutation_probability, rng);
        next.push(child);
    }
    next
}
