//! Rostering domain models.
//!
//! Input records (drivers, locations, travel-time edges, routes), the
//! travel-time oracle built from them, and the projected per-driver
//! schedule that a run produces.
//!
//! # Domain Mappings
//!
//! | u-roster | General scheduling |
//! |----------|--------------------|
//! | Driver | Resource |
//! | Route | Activity with fixed start |
//! | TravelTimeMatrix | Sequence-dependent setup times |
//! | RosterSchedule | Schedule |

mod driver;
mod location;
mod route;
mod schedule;
mod travel_time;

pub use driver::{Driver, DriverId};
pub use location::{normalize_pair, Location, LocationId, TravelTimeEdge};
pub use route::{format_time_of_day, DepartureTime, Route, RouteId, TimeParseError};
pub use schedule::{DriverSchedule, RosterSchedule, ScheduledRoute};
pub use travel_time::{TravelTimeMatrix, DEFAULT_TRAVEL_MINUTES};
