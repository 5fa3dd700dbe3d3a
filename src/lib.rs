//! Driver rostering for a single day of timed routes.
//!
//! Assigns every route to one driver so that work is spread evenly and no
//! driver is asked to start a route before they can reach it. The search is
//! a generational genetic algorithm with elitist truncation selection.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Driver`, `Location`, `Route`,
//!   `TravelTimeMatrix`, `RosterSchedule`
//! - **`validation`**: Input integrity checks (empty collections, duplicate IDs,
//!   unknown locations, bad travel-time edges)
//! - **`ga`**: Chromosome encoding, fitness, selection and the evolution loop
//! - **`scheduler`**: Validate → search → guard → project pipeline, KPIs and
//!   background jobs
//! - **`config`**: JSON-loadable run configuration
//!
//! # Quick start
//!
//! ```no_run
//! use u_roster::models::{Driver, Location, Route, TravelTimeEdge};
//!
//! let schedule = u_roster::run_schedule(
//!     vec![Driver::new(1, "Anna"), Driver::new(2, "Boris")],
//!     vec![Location::new(1, "Depot"), Location::new(2, "Airport")],
//!     vec![TravelTimeEdge::new(1, 2, 45.0)],
//!     vec![
//!         Route::parse(1, 1, 2, "07:00")?,
//!         Route::parse(2, 2, 1, "09:30")?,
//!     ],
//! )?;
//! for driver in &schedule.drivers {
//!     println!("{}: {} routes", driver.driver_name, driver.routes.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # References
//!
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of applications,
//!   methods and models"

pub mod config;
pub mod error;
pub mod ga;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::RosterConfig;
pub use error::ScheduleError;
pub use scheduler::{run_schedule, RosterKpi, RosterScheduler, ScheduleJob, ScheduleRequest};
