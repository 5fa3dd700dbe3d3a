//! Route model and wall-clock time handling.
//!
//! A route is a single-day transport leg with a mandated departure time.
//! Times are wall-clock "HH:MM" strings at the boundary and minutes since
//! midnight inside the optimizer.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::LocationId;

/// Route identifier.
pub type RouteId = u32;

const TIME_FORMAT: &str = "%H:%M";

/// Error returned for a departure time that is not a valid "HH:MM".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time of day '{input}', expected HH:MM")]
pub struct TimeParseError {
    /// The rejected input.
    pub input: String,
}

/// Wall-clock departure time within a single day.
///
/// Ordered by minute of day. Serialized as "HH:MM".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DepartureTime {
    minute_of_day: u32,
}

impl DepartureTime {
    /// Creates a time from hour and minute. Returns `None` when out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self {
                minute_of_day: hour * 60 + minute,
            })
        } else {
            None
        }
    }

    /// Parses an "HH:MM" string.
    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        let time = NaiveTime::parse_from_str(input.trim(), TIME_FORMAT).map_err(|_| {
            TimeParseError {
                input: input.to_string(),
            }
        })?;
        Ok(Self {
            minute_of_day: time.hour() * 60 + time.minute(),
        })
    }

    /// Minutes elapsed since midnight.
    #[inline]
    pub fn minute_of_day(&self) -> u32 {
        self.minute_of_day
    }

    /// Minutes since midnight as a real value, for arithmetic with travel times.
    #[inline]
    pub fn as_minutes(&self) -> f64 {
        f64::from(self.minute_of_day)
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}",
            self.minute_of_day / 60,
            self.minute_of_day % 60
        )
    }
}

impl FromStr for DepartureTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DepartureTime {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DepartureTime> for String {
    fn from(value: DepartureTime) -> Self {
        value.to_string()
    }
}

/// Formats minutes since midnight as "HH:MM".
///
/// Values past midnight wrap around the clock; seconds are truncated.
pub fn format_time_of_day(minutes: f64) -> String {
    let millis = (minutes * 60_000.0).round() as i64;
    let (time, _) = NaiveTime::MIN.overflowing_add_signed(TimeDelta::milliseconds(millis));
    time.format(TIME_FORMAT).to_string()
}

/// A single-day transport route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Unique route identifier.
    pub id: RouteId,
    /// Location the route departs from.
    pub start_location_id: LocationId,
    /// Location the route arrives at.
    pub end_location_id: LocationId,
    /// Mandated departure time.
    pub departure_time: DepartureTime,
}

impl Route {
    /// Creates a route.
    pub fn new(
        id: RouteId,
        start_location_id: LocationId,
        end_location_id: LocationId,
        departure_time: DepartureTime,
    ) -> Self {
        Self {
            id,
            start_location_id,
            end_location_id,
            departure_time,
        }
    }

    /// Creates a route from an "HH:MM" departure string.
    pub fn parse(
        id: RouteId,
        start_location_id: LocationId,
        end_location_id: LocationId,
        departure: &str,
    ) -> Result<Self, TimeParseError> {
        Ok(Self::new(
            id,
            start_location_id,
            end_location_id,
            DepartureTime::parse(departure)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_departure() {
        let t = DepartureTime::parse("09:35").unwrap();
        assert_eq!(t.minute_of_day(), 9 * 60 + 35);
        assert_eq!(t.to_string(), "09:35");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(DepartureTime::parse("25:00").is_err());
        assert!(DepartureTime::parse("noon").is_err());
        assert!(DepartureTime::parse("").is_err());
    }

    #[test]
    fn test_from_hm_bounds() {
        assert_eq!(DepartureTime::from_hm(23, 59).unwrap().minute_of_day(), 1439);
        assert!(DepartureTime::from_hm(24, 0).is_none());
        assert!(DepartureTime::from_hm(0, 60).is_none());
    }

    #[test]
    fn test_ordering() {
        let a = DepartureTime::parse("08:00").unwrap();
        let b = DepartureTime::parse("08:01").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_format_time_of_day() {
        assert_eq!(format_time_of_day(0.0), "00:00");
        assert_eq!(format_time_of_day(9.0 * 60.0 + 45.0), "09:45");
        // 12.5 minutes past 10:00 truncates to the whole minute
        assert_eq!(format_time_of_day(600.0 + 12.5), "10:12");
        // Wraps past midnight
        assert_eq!(format_time_of_day(24.0 * 60.0 + 15.0), "00:15");
    }

    #[test]
    fn test_route_serde() {
        let r: Route = serde_json::from_str(
            r#"{"id": 1, "start_location_id": 2, "end_location_id": 3, "departure_time": "07:30"}"#,
        )
        .unwrap();
        assert_eq!(r, Route::parse(1, 2, 3, "07:30").unwrap());

        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"07:30\""));
    }

    #[test]
    fn test_route_serde_rejects_bad_time() {
        let r: Result<Route, _> = serde_json::from_str(
            r#"{"id": 1, "start_location_id": 2, "end_location_id": 3, "departure_time": "7h30"}"#,
        );
        assert!(r.is_err());
    }
}
