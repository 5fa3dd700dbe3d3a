//! Roster quality metrics (KPIs).
//!
//! Computed from a projected roster, independent of the fitness that
//! produced it.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Routes per driver | Count of assigned routes, input driver order |
//! | Min / max routes | Spread of the per-driver counts |
//! | Idle drivers | Drivers with no routes |
//! | Driving minutes | Sum of route travel times |
//! | Transfer conflicts | Consecutive routes of one driver that cannot be reached in time |

use crate::models::{RosterSchedule, TravelTimeMatrix};

/// Roster performance indicators.
///
/// All time values are in minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterKpi {
    /// Routes assigned to each driver, in schedule order.
    pub routes_per_driver: Vec<usize>,
    /// Fewest routes any driver got.
    pub min_routes: usize,
    /// Most routes any driver got.
    pub max_routes: usize,
    /// Drivers with no routes.
    pub idle_drivers: usize,
    /// Total travel time of all scheduled routes.
    pub total_driving_minutes: f64,
    /// Back-to-back routes departing before
    /// `previous arrival + transfer + buffer`.
    pub transfer_conflicts: usize,
}

impl RosterKpi {
    /// Computes KPIs from a roster.
    ///
    /// # Arguments
    /// * `schedule` - Projected roster; each driver's routes in departure order.
    /// * `matrix` - Travel times used to build the roster.
    /// * `buffer_minutes` - Handling buffer between consecutive routes.
    pub fn calculate(
        schedule: &RosterSchedule,
        matrix: &TravelTimeMatrix,
        buffer_minutes: f64,
    ) -> Self {
        let routes_per_driver: Vec<usize> =
            schedule.drivers.iter().map(|d| d.route_count()).collect();
        let mut total_driving_minutes = 0.0;
        let mut transfer_conflicts = 0;

        for driver in &schedule.drivers {
            for route in &driver.routes {
                total_driving_minutes += route.arrival_minutes - route.departure_time.as_minutes();
            }
            for pair in driver.routes.windows(2) {
                let (prev, next) = (&pair[0], &pair[1]);
                let earliest_start = prev.arrival_minutes
                    + matrix.travel_time(prev.end_location_id, next.start_location_id)
                    + buffer_minutes;
                if next.departure_time.as_minutes() < earliest_start {
                    transfer_conflicts += 1;
                }
            }
        }

        Self {
            min_routes: routes_per_driver.iter().copied().min().unwrap_or(0),
            max_routes: routes_per_driver.iter().copied().max().unwrap_or(0),
            idle_drivers: routes_per_driver.iter().filter(|&&n| n == 0).count(),
            routes_per_driver,
            total_driving_minutes,
            transfer_conflicts,
        }
    }

    /// Whether every driver can reach each of their routes in time.
    pub fn is_conflict_free(&self) -> bool {
        self.transfer_conflicts == 0
    }

    /// Difference between the busiest and the least busy driver.
    pub fn imbalance(&self) -> usize {
        self.max_routes - self.min_routes
    }
}
