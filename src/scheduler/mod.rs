//! Rostering entry points.
//!
//! [`RosterScheduler`] validates the input, runs the GA, rejects runs whose
//! best fitness is below the acceptance threshold and projects the winner
//! into a [`RosterSchedule`]. [`ScheduleJob`] runs the same pipeline on a
//! background worker with cancellation and a timeout.
//!
//! # Example
//!
//! ```
//! use u_roster::config::RosterConfig;
//! use u_roster::ga::GaConfig;
//! use u_roster::models::{Driver, Location, Route, TravelTimeEdge};
//! use u_roster::scheduler::{RosterScheduler, ScheduleRequest};
//!
//! let request = ScheduleRequest::new(
//!     vec![Driver::new(1, "Anna"), Driver::new(2, "Boris")],
//!     vec![Location::new(1, "Depot"), Location::new(2, "Airport")],
//!     vec![TravelTimeEdge::new(1, 2, 40.0)],
//!     vec![
//!         Route::parse(1, 1, 2, "08:00").unwrap(),
//!         Route::parse(2, 1, 2, "08:00").unwrap(),
//!     ],
//! );
//! let config = RosterConfig::default()
//!     .with_ga(GaConfig::default().with_max_generations(50))
//!     .with_seed(42);
//!
//! let schedule = RosterScheduler::new(config).schedule(&request).unwrap();
//! assert_eq!(schedule.route_count(), 2);
//! ```

mod job;
mod kpi;

use std::sync::atomic::AtomicBool;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use job::ScheduleJob;
pub use kpi::RosterKpi;

use crate::config::RosterConfig;
use crate::error::ScheduleError;
use crate::ga::{GaRunner, RosterProblem};
use crate::models::{Driver, Location, Route, RosterSchedule, TravelTimeEdge};

/// The four input collections of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub drivers: Vec<Driver>,
    pub locations: Vec<Location>,
    pub travel_times: Vec<TravelTimeEdge>,
    pub routes: Vec<Route>,
}

impl ScheduleRequest {
    pub fn new(
        drivers: Vec<Driver>,
        locations: Vec<Location>,
        travel_times: Vec<TravelTimeEdge>,
        routes: Vec<Route>,
    ) -> Self {
        Self {
            drivers,
            locations,
            travel_times,
            routes,
        }
    }
}

/// Assigns routes to drivers with the GA and projects the result.
#[derive(Debug, Clone, Default)]
pub struct RosterScheduler {
    config: RosterConfig,
}

impl RosterScheduler {
    pub fn new(config: RosterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Runs the full pipeline with an RNG seeded from the config
    /// (or from the OS when no seed is set).
    pub fn schedule(&self, request: &ScheduleRequest) -> Result<RosterSchedule, ScheduleError> {
        self.schedule_until(request, None)
    }

    /// Runs the full pipeline with a caller-supplied RNG.
    pub fn schedule_with_rng<R: Rng>(
        &self,
        request: &ScheduleRequest,
        rng: &mut R,
    ) -> Result<RosterSchedule, ScheduleError> {
        self.execute(request, rng, None)
    }

    /// Like [`schedule`](Self::schedule), but ends with
    /// [`ScheduleError::Cancelled`] once `stop` is raised.
    pub fn schedule_until(
        &self,
        request: &ScheduleRequest,
        stop: Option<&AtomicBool>,
    ) -> Result<RosterSchedule, ScheduleError> {
        let mut rng = match self.config.ga.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.execute(request, &mut rng, stop)
    }

    fn execute<R: Rng>(
        &self,
        request: &ScheduleRequest,
        rng: &mut R,
        stop: Option<&AtomicBool>,
    ) -> Result<RosterSchedule, ScheduleError> {
        let problem = RosterProblem::new(
            request.drivers.clone(),
            request.locations.clone(),
            &request.travel_times,
            request.routes.clone(),
        )
        .inspect_err(log_rejected_input)?
        .with_weights(self.config.fitness.clone())
        .with_default_travel_minutes(self.config.default_travel_minutes);
        self.config.validate()?;

        let result = GaRunner::run_with_rng(&problem, &self.config.ga, rng, stop)?;

        if result.best_fitness < self.config.acceptance_threshold {
            warn!(
                best_fitness = result.best_fitness,
                threshold = self.config.acceptance_threshold,
                "no acceptable roster found"
            );
            return Err(ScheduleError::SchedulingFailure {
                best_fitness: result.best_fitness,
                threshold: self.config.acceptance_threshold,
            });
        }

        let schedule = problem.decode(&result.best);
        let kpi = RosterKpi::calculate(
            &schedule,
            problem.travel_times(),
            self.config.fitness.handling_buffer_minutes,
        );
        info!(
            best_fitness = schedule.best_fitness,
            routes_per_driver = ?kpi.routes_per_driver,
            min_routes = kpi.min_routes,
            max_routes = kpi.max_routes,
            idle_drivers = kpi.idle_drivers,
            total_driving_minutes = kpi.total_driving_minutes,
            transfer_conflicts = kpi.transfer_conflicts,
            "roster ready"
        );
        Ok(schedule)
    }
}

fn log_rejected_input(error: &ScheduleError) {
    match error {
        ScheduleError::InvalidInput(errors) => {
            for e in errors {
                warn!(kind = ?e.kind, "{}", e.message);
            }
        }
        other => warn!(error = %other, "rejected roster input"),
    }
}

/// Runs one rostering pass with the default configuration.
///
/// Fails with [`ScheduleError::InvalidInput`] if any collection is empty and
/// with [`ScheduleError::SchedulingFailure`] if the best fitness found is
/// below -99.
pub fn run_schedule(
    drivers: Vec<Driver>,
    locations: Vec<Location>,
    travel_times: Vec<TravelTimeEdge>,
    routes: Vec<Route>,
) -> Result<RosterSchedule, ScheduleError> {
    RosterScheduler::default().schedule(&ScheduleRequest::new(
        drivers,
        locations,
        travel_times,
        routes,
    ))
}
