//! Route-to-driver assignment chromosome.
//!
//! # Encoding
//!
//! One [`RouteAssignment`] per input route, kept in canonical order:
//! ascending route ID. Storage order is an implementation detail; callers
//! look assignments up by route ID through [`RosterChromosome::driver_for`].
//! Crossover and mutation walk the canonical order, never departure order,
//! so results do not depend on how routes were supplied.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{DriverId, RouteId};

/// Assignment of one route to one driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteAssignment {
    pub route_id: RouteId,
    pub driver_id: DriverId,
}

/// A complete candidate assignment (one individual of the population).
///
/// Higher fitness = better (maximization convention, 0 = no penalties).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterChromosome {
    /// Assignments in ascending route-ID order.
    pub assignments: Vec<RouteAssignment>,
    /// Cached fitness; `None` until evaluated.
    pub fitness: Option<i64>,
}

impl RosterChromosome {
    /// Creates an individual by drawing, for every route independently, a
    /// driver uniformly at random (with replacement).
    ///
    /// `route_ids` must be in ascending order and `drivers` non-empty.
    pub fn random<R: Rng>(route_ids: &[RouteId], drivers: &[DriverId], rng: &mut R) -> Self {
        debug_assert!(!drivers.is_empty());
        debug_assert!(route_ids.windows(2).all(|w| w[0] < w[1]));
        let assignments = route_ids
            .iter()
            .map(|&route_id| RouteAssignment {
                route_id,
                driver_id: drivers[rng.random_range(0..drivers.len())],
            })
            .collect();
        Self {
            assignments,
            fitness: None,
        }
    }

    /// Builds an individual from explicit assignments, restoring canonical order.
    pub fn from_assignments(mut assignments: Vec<RouteAssignment>) -> Self {
        assignments.sort_by_key(|a| a.route_id);
        Self {
            assignments,
            fitness: None,
        }
    }

    /// Driver assigned to a route.
    pub fn driver_for(&self, route_id: RouteId) -> Option<DriverId> {
        self.assignments
            .binary_search_by_key(&route_id, |a| a.route_id)
            .ok()
            .map(|idx| self.assignments[idx].driver_id)
    }

    /// Number of routes assigned to a driver.
    pub fn route_count_for(&self, driver_id: DriverId) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.driver_id == driver_id)
            .count()
    }

    /// Validates coverage: every route in `route_ids` appears exactly once,
    /// nothing else appears, and every driver is known.
    pub fn is_valid(&self, route_ids: &[RouteId], drivers: &[DriverId]) -> bool {
        if self.assignments.len() != route_ids.len() {
            return false;
        }
        let expected: HashSet<RouteId> = route_ids.iter().copied().collect();
        let known_drivers: HashSet<DriverId> = drivers.iter().copied().collect();
        let mut seen = HashSet::with_capacity(self.assignments.len());
        self.assignments.iter().all(|a| {
            expected.contains(&a.route_id)
                && seen.insert(a.route_id)
                && known_drivers.contains(&a.driver_id)
        })
    }
}

// ======================== Crossover ========================

/// Uniform crossover.
///
/// For each route in canonical order, copies parent 1's or parent 2's
/// driver with probability 0.5 each. Both parents cover the same routes,
/// so the child does too.
pub fn uniform_crossover<R: Rng>(
    p1: &RosterChromosome,
    p2: &RosterChromosome,
    rng: &mut R,
) -> RosterChromosome {
    debug_assert_eq!(p1.assignments.len(), p2.assignments.len());
    let assignments = p1
        .assignments
        .iter()
        .zip(&p2.assignments)
        .map(|(a, b)| {
            debug_assert_eq!(a.route_id, b.route_id);
            if rng.random_bool(0.5) {
                *a
            } else {
                *b
            }
        })
        .collect();
    RosterChromosome {
        assignments,
        fitness: None,
    }
}

// ======================== Mutation ========================

/// First-hit swap mutation.
///
/// Walks the assignments in canonical order flipping a coin with success
/// probability `probability` at each position. At the first success, the
/// driver at that position is swapped with the driver at a uniformly
/// chosen position (possibly itself) and the scan stops. At most one swap
/// is applied per call.
///
/// Returns whether a swap fired.
pub fn first_hit_swap_mutation<R: Rng>(
    chromosome: &mut RosterChromosome,
    probability: f64,
    rng: &mut R,
) -> bool {
    let len = chromosome.assignments.len();
    for i in 0..len {
        if rng.random::<f64>() < probability {
            let j = rng.random_range(0..len);
            swap_drivers(chromosome, i, j);
            return true;
        }
    }
    false
}

/// Per-position swap mutation.
///
/// Like [`first_hit_swap_mutation`] but keeps scanning after a swap, so
/// every position gets its own chance. Applies much stronger mutation
/// pressure on long chromosomes.
///
/// Returns the number of swaps applied.
pub fn per_position_swap_mutation<R: Rng>(
    chromosome: &mut RosterChromosome,
    probability: f64,
    rng: &mut R,
) -> usize {
    let len = chromosome.assignments.len();
    let mut swaps = 0;
    for i in 0..len {
        if rng.random::<f64>() < probability {
            let j = rng.random_range(0..len);
            swap_drivers(chromosome, i, j);
            swaps += 1;
        }
    }
    swaps
}

/// Exchanges the drivers of two positions; route IDs stay put.
fn swap_drivers(chromosome: &mut RosterChromosome, i: usize, j: usize) {
    if i == j {
        return;
    }
    let di = chromosome.assignments[i].driver_id;
    chromosome.assignments[i].driver_id = chromosome.assignments[j].driver_id;
    chromosome.assignments[j].driver_id = di;
    chromosome.fitness = None;
}
