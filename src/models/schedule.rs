//! Projected roster (solution) model.
//!
//! A roster lists, per driver and in caller-supplied driver order, the
//! routes assigned to that driver sorted by departure time, with each
//! route's computed arrival time.

use serde::{Deserialize, Serialize};

use super::{DepartureTime, DriverId, LocationId, RouteId, TimeParseError};

const MINUTES_PER_DAY: f64 = 1440.0;

/// A complete per-driver schedule produced by one optimizer run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterSchedule {
    /// One entry per input driver, in input order. Drivers without routes
    /// are included with an empty list.
    pub drivers: Vec<DriverSchedule>,
    /// Fitness of the individual this schedule was projected from.
    pub best_fitness: i64,
}

/// The ordered routes of one driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSchedule {
    /// Driver ID.
    pub driver_id: DriverId,
    /// Driver name (denormalized for display).
    pub driver_name: String,
    /// Assigned routes, ascending by departure time.
    pub routes: Vec<ScheduledRoute>,
}

/// One assigned route with its computed arrival.
///
/// Deserializing rebuilds `arrival_minutes` from the two wall-clock times:
/// an arrival earlier than the departure is taken to be on the next day.
/// Legs longer than a day and sub-minute precision are not recoverable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScheduledRouteRecord")]
pub struct ScheduledRoute {
    /// Route ID.
    pub route_id: RouteId,
    /// Start location ID.
    pub start_location_id: LocationId,
    /// Start location name.
    pub start_location: String,
    /// End location ID.
    pub end_location_id: LocationId,
    /// End location name.
    pub end_location: String,
    /// Mandated departure.
    pub departure_time: DepartureTime,
    /// Arrival as "HH:MM" (wraps past midnight).
    pub arrival_time: String,
    /// Arrival in minutes since midnight, not wrapped.
    #[serde(skip)]
    pub arrival_minutes: f64,
}

/// Wire form of [`ScheduledRoute`].
#[derive(Deserialize)]
struct ScheduledRouteRecord {
    route_id: RouteId,
    start_location_id: LocationId,
    start_location: String,
    end_location_id: LocationId,
    end_location: String,
    departure_time: DepartureTime,
    arrival_time: String,
}

impl TryFrom<ScheduledRouteRecord> for ScheduledRoute {
    type Error = TimeParseError;

    fn try_from(r: ScheduledRouteRecord) -> Result<Self, Self::Error> {
        let departure = r.departure_time.as_minutes();
        let mut arrival_minutes = DepartureTime::parse(&r.arrival_time)?.as_minutes();
        if arrival_minutes < departure {
            arrival_minutes += MINUTES_PER_DAY;
        }
        Ok(Self {
            route_id: r.route_id,
            start_location_id: r.start_location_id,
            start_location: r.start_location,
            end_location_id: r.end_location_id,
            end_location: r.end_location,
            departure_time: r.departure_time,
            arrival_time: r.arrival_time,
            arrival_minutes,
        })
    }
}

impl DriverSchedule {
    /// Creates an empty driver schedule.
    pub fn new(driver_id: DriverId, driver_name: impl Into<String>) -> Self {
        Self {
            driver_id,
            driver_name: driver_name.into(),
            routes: Vec::new(),
        }
    }

    /// Number of routes assigned to this driver.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}

impl RosterSchedule {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule of a single driver.
    pub fn driver(&self, driver_id: DriverId) -> Option<&DriverSchedule> {
        self.drivers.iter().find(|d| d.driver_id == driver_id)
    }

    /// Driver a route was assigned to.
    pub fn driver_for_route(&self, route_id: RouteId) -> Option<DriverId> {
        self.drivers
            .iter()
            .find(|d| d.routes.iter().any(|r| r.route_id == route_id))
            .map(|d| d.driver_id)
    }

    /// Total number of scheduled routes across all drivers.
    pub fn route_count(&self) -> usize {
        self.drivers.iter().map(DriverSchedule::route_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled(route_id: RouteId, departure: &str) -> ScheduledRoute {
        ScheduledRoute {
            route_id,
            start_location_id: 1,
            start_location: "Depot".into(),
            end_location_id: 2,
            end_location: "Airport".into(),
            departure_time: DepartureTime::parse(departure).unwrap(),
            arrival_time: "00:00".into(),
            arrival_minutes: 0.0,
        }
    }

    fn sample_roster() -> RosterSchedule {
        let mut a = DriverSchedule::new(1, "Anna");
        a.routes.push(scheduled(10, "08:00"));
        a.routes.push(scheduled(11, "12:00"));
        let mut b = DriverSchedule::new(2, "Boris");
        b.routes.push(scheduled(12, "09:00"));
        RosterSchedule {
            drivers: vec![a, b, DriverSchedule::new(3, "Vera")],
            best_fitness: 0,
        }
    }

    #[test]
    fn test_route_count() {
        let s = sample_roster();
        assert_eq!(s.route_count(), 3);
        assert_eq!(s.driver(1).unwrap().route_count(), 2);
        assert_eq!(s.driver(3).unwrap().route_count(), 0);
        assert!(s.driver(99).is_none());
    }

    #[test]
    fn test_driver_for_route() {
        let s = sample_roster();
        assert_eq!(s.driver_for_route(11), Some(1));
        assert_eq!(s.driver_for_route(12), Some(2));
        assert_eq!(s.driver_for_route(99), None);
    }

    #[test]
    fn test_deserialize_rebuilds_arrival_minutes() {
        let json = r#"{
            "drivers": [{
                "driver_id": 1,
                "driver_name": "Anna",
                "routes": [
                    {"route_id": 1, "start_location_id": 1, "start_location": "Depot",
                     "end_location_id": 2, "end_location": "Airport",
                     "departure_time": "08:00", "arrival_time": "09:15"},
                    {"route_id": 2, "start_location_id": 2, "start_location": "Airport",
                     "end_location_id": 1, "end_location": "Depot",
                     "departure_time": "23:30", "arrival_time": "00:15"}
                ]
            }],
            "best_fitness": 0
        }"#;
        let s: RosterSchedule = serde_json::from_str(json).unwrap();
        let routes = &s.drivers[0].routes;
        assert_eq!(routes[0].arrival_minutes, 9.0 * 60.0 + 15.0);
        assert_eq!(routes[1].arrival_minutes, 24.0 * 60.0 + 15.0);
    }

    #[test]
    fn test_deserialize_rejects_bad_arrival() {
        let json = r#"{"route_id": 1, "start_location_id": 1, "start_location": "Depot",
            "end_location_id": 2, "end_location": "Airport",
            "departure_time": "08:00", "arrival_time": "late"}"#;
        assert!(serde_json::from_str::<ScheduledRoute>(json).is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(sample_roster()).unwrap();
        let first = &json["drivers"][0]["routes"][0];
        assert_eq!(first["route_id"], 10);
        assert_eq!(first["departure_time"], "08:00");
        assert!(first.get("arrival_minutes").is_none());
    }

    #[test]
    fn test_empty_roster() {
        let s = RosterSchedule::new();
        assert_eq!(s.route_count(), 0);
        assert!(s.drivers.is_empty());
    }
}
