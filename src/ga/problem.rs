//! Rostering GA problem definition.
//!
//! Holds the immutable snapshot of one run (drivers, routes, travel-time
//! oracle), scores individuals and projects the winner into a
//! per-driver schedule.
//!
//! # Fitness
//!
//! Starts at 0 and only goes down:
//! - **Balance**: for each driver, `trunc(|count - ideal| * balance_penalty)`
//!   where `ideal = routes / drivers`. Applied to every driver, however
//!   small the deviation.
//! - **Feasibility**: replaying the day in departure order, each route that
//!   departs before its driver can arrive from the previous route's end
//!   (previous arrival + transfer travel + handling buffer) costs
//!   `overlap_penalty`. The scan is greedy: the driver's last end time and
//!   place are always updated, conflicting or not.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::RosterChromosome;
use crate::error::ScheduleError;
use crate::models::{
    format_time_of_day, Driver, DriverId, DriverSchedule, Location, LocationId, RosterSchedule,
    Route, RouteId, ScheduledRoute, TravelTimeEdge, TravelTimeMatrix,
};
use crate::validation::validate_input;

/// Penalty weights and the transfer buffer used by the fitness function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    /// Penalty per whole unit of deviation from the ideal route count.
    pub balance_penalty: i64,
    /// Penalty per back-to-back route a driver cannot reach in time.
    pub overlap_penalty: i64,
    /// Handling time (minutes) a driver needs between two routes.
    pub handling_buffer_minutes: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            balance_penalty: 1,
            overlap_penalty: 100,
            handling_buffer_minutes: 10.0,
        }
    }
}

/// Fitness split into its two terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FitnessBreakdown {
    /// Balance term (≤ 0).
    pub balance: i64,
    /// Feasibility term (≤ 0).
    pub feasibility: i64,
    /// Number of transfer conflicts behind the feasibility term.
    pub conflicts: usize,
}

impl FitnessBreakdown {
    /// Total fitness.
    #[inline]
    pub fn total(&self) -> i64 {
        self.balance + self.feasibility
    }
}

/// GA problem for assigning routes to drivers.
///
/// # Example
/// ```
/// use u_roster::ga::RosterProblem;
/// use u_roster::models::{Driver, Location, Route, TravelTimeEdge};
/// use rand::{rngs::SmallRng, SeedableRng};
///
/// let problem = RosterProblem::new(
///     vec![Driver::new(1, "Anna"), Driver::new(2, "Boris")],
///     vec![Location::new(1, "Depot"), Location::new(2, "Airport")],
///     &[TravelTimeEdge::new(1, 2, 40.0)],
///     vec![
///         Route::parse(1, 1, 2, "08:00").unwrap(),
///         Route::parse(2, 2, 1, "12:00").unwrap(),
///     ],
/// )
/// .unwrap();
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let individual = problem.create_individual(&mut rng);
/// assert!(problem.evaluate(&individual) <= 0);
/// ```
#[derive(Debug, Clone)]
pub struct RosterProblem {
    /// Drivers in caller-supplied order.
    drivers: Vec<Driver>,
    driver_ids: Vec<DriverId>,
    driver_index: HashMap<DriverId, usize>,
    /// Routes in canonical order (ascending ID).
    routes: Vec<Route>,
    route_ids: Vec<RouteId>,
    /// Positions into `routes`, ascending by departure (ties by route ID).
    time_order: Vec<usize>,
    location_names: HashMap<LocationId, String>,
    matrix: TravelTimeMatrix,
    weights: FitnessWeights,
}

impl RosterProblem {
    /// Validates the inputs and builds the run snapshot.
    ///
    /// Fails with [`ScheduleError::InvalidInput`] when any collection is
    /// empty or the records are inconsistent.
    pub fn new(
        drivers: Vec<Driver>,
        locations: Vec<Location>,
        travel_times: &[TravelTimeEdge],
        mut routes: Vec<Route>,
    ) -> Result<Self, ScheduleError> {
        validate_input(&drivers, &locations, travel_times, &routes)
            .map_err(ScheduleError::InvalidInput)?;

        routes.sort_by_key(|r| r.id);
        let route_ids: Vec<RouteId> = routes.iter().map(|r| r.id).collect();
        let mut time_order: Vec<usize> = (0..routes.len()).collect();
        time_order.sort_by_key(|&i| routes[i].departure_time);

        let driver_ids: Vec<DriverId> = drivers.iter().map(|d| d.id).collect();
        let driver_index = driver_ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();
        let location_names = locations.into_iter().map(|l| (l.id, l.name)).collect();

        Ok(Self {
            drivers,
            driver_ids,
            driver_index,
            routes,
            route_ids,
            time_order,
            location_names,
            matrix: TravelTimeMatrix::from_edges(travel_times),
            weights: FitnessWeights::default(),
        })
    }

    /// Sets the fitness weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the fallback travel time for location pairs without an edge.
    pub fn with_default_travel_minutes(mut self, minutes: f64) -> Self {
        self.matrix = self.matrix.with_default(minutes);
        self
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn driver_ids(&self) -> &[DriverId] {
        &self.driver_ids
    }

    /// Routes in canonical (ascending ID) order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route_ids(&self) -> &[RouteId] {
        &self.route_ids
    }

    pub fn travel_times(&self) -> &TravelTimeMatrix {
        &self.matrix
    }

    pub fn weights(&self) -> &FitnessWeights {
        &self.weights
    }

    /// Creates a random individual.
    pub fn create_individual<R: Rng>(&self, rng: &mut R) -> RosterChromosome {
        RosterChromosome::random(&self.route_ids, &self.driver_ids, rng)
    }

    /// Scores an individual. Higher is better; 0 means no penalties.
    pub fn evaluate(&self, individual: &RosterChromosome) -> i64 {
        self.fitness_breakdown(individual).total()
    }

    /// Scores every individual whose fitness is not cached yet.
    pub fn evaluate_population(&self, population: &mut [RosterChromosome]) {
        for individual in population.iter_mut().filter(|c| c.fitness.is_none()) {
            individual.fitness = Some(self.evaluate(individual));
        }
    }

    /// Scores an individual, reporting both terms separately.
    pub fn fitness_breakdown(&self, individual: &RosterChromosome) -> FitnessBreakdown {
        let mut counts = vec![0usize; self.drivers.len()];
        for a in &individual.assignments {
            if let Some(&d) = self.driver_index.get(&a.driver_id) {
                counts[d] += 1;
            }
        }

        let ideal = self.routes.len() as f64 / self.drivers.len() as f64;
        let balance_weight = self.weights.balance_penalty as f64;
        let balance: i64 = counts
            .iter()
            .map(|&count| -(((count as f64 - ideal).abs() * balance_weight) as i64))
            .sum();

        let mut last_end: Vec<Option<(f64, LocationId)>> = vec![None; self.drivers.len()];
        let mut conflicts = 0usize;
        for &pos in &self.time_order {
            let route = &self.routes[pos];
            let Some(d) = individual
                .driver_for(route.id)
                .and_then(|id| self.driver_index.get(&id).copied())
            else {
                continue;
            };

            if let Some((end_minutes, end_location)) = last_end[d] {
                let earliest_start = end_minutes
                    + self.matrix.travel_time(end_location, route.start_location_id)
                    + self.weights.handling_buffer_minutes;
                if route.departure_time.as_minutes() < earliest_start {
                    conflicts += 1;
                }
            }
            last_end[d] = Some((self.matrix.arrival_minutes(route), route.end_location_id));
        }

        FitnessBreakdown {
            balance,
            feasibility: -(conflicts as i64) * self.weights.overlap_penalty,
            conflicts,
        }
    }

    /// Projects an individual into a per-driver schedule.
    ///
    /// Drivers appear in input order; each driver's routes are sorted by
    /// departure and carry their arrival time.
    pub fn decode(&self, individual: &RosterChromosome) -> RosterSchedule {
        let mut drivers: Vec<DriverSchedule> = self
            .drivers
            .iter()
            .map(|d| DriverSchedule::new(d.id, d.name.clone()))
            .collect();

        for &pos in &self.time_order {
            let route = &self.routes[pos];
            let Some(d) = individual
                .driver_for(route.id)
                .and_then(|id| self.driver_index.get(&id).copied())
            else {
                continue;
            };
            let arrival = self.matrix.arrival_minutes(route);
            drivers[d].routes.push(ScheduledRoute {
                route_id: route.id,
                start_location_id: route.start_location_id,
                start_location: self.location_name(route.start_location_id),
                end_location_id: route.end_location_id,
                end_location: self.location_name(route.end_location_id),
                departure_time: route.departure_time,
                arrival_time: format_time_of_day(arrival),
                arrival_minutes: arrival,
            });
        }

        RosterSchedule {
            drivers,
            best_fitness: individual
                .fitness
                .unwrap_or_else(|| self.evaluate(individual)),
        }
    }

    fn location_name(&self, id: LocationId) -> String {
        self.location_names.get(&id).cloned().unwrap_or_default()
    }
}
