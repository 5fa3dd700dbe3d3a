//! Travel-time oracle.
//!
//! Symmetric lookup of inter-location travel durations keyed by the
//! normalized location pair. Pairs without a stored edge fall back to a
//! fixed default, which models a moderate transfer cost rather than an
//! error.

use std::collections::HashMap;

use super::{normalize_pair, LocationId, Route, TravelTimeEdge};

/// Fallback travel time (minutes) for pairs with no stored edge.
pub const DEFAULT_TRAVEL_MINUTES: f64 = 30.0;

/// Undirected travel-time table with a fallback default.
///
/// # Example
///
/// ```
/// use u_roster::models::{TravelTimeEdge, TravelTimeMatrix};
///
/// let matrix = TravelTimeMatrix::from_edges(&[TravelTimeEdge::new(1, 2, 45.0)]);
/// assert_eq!(matrix.travel_time(1, 2), 45.0);
/// assert_eq!(matrix.travel_time(2, 1), 45.0);
/// assert_eq!(matrix.travel_time(1, 1), 0.0);
/// assert_eq!(matrix.travel_time(1, 3), 30.0);
/// ```
#[derive(Debug, Clone)]
pub struct TravelTimeMatrix {
    edges: HashMap<(LocationId, LocationId), f64>,
    default_minutes: f64,
}

impl TravelTimeMatrix {
    /// Creates an empty matrix with the standard fallback.
    pub fn new() -> Self {
        Self {
            edges: HashMap::new(),
            default_minutes: DEFAULT_TRAVEL_MINUTES,
        }
    }

    /// Builds a matrix from edges. Later duplicates of a pair overwrite earlier ones.
    pub fn from_edges(edges: &[TravelTimeEdge]) -> Self {
        let mut matrix = Self::new();
        for edge in edges {
            matrix.set_travel_time(edge.from_location_id, edge.to_location_id, edge.travel_minutes);
        }
        matrix
    }

    /// Sets the fallback used for pairs without an edge.
    pub fn with_default(mut self, default_minutes: f64) -> Self {
        self.default_minutes = default_minutes;
        self
    }

    /// Defines the travel time between two locations (both directions).
    pub fn set_travel_time(&mut self, a: LocationId, b: LocationId, minutes: f64) {
        self.edges.insert(normalize_pair(a, b), minutes);
    }

    /// Travel time in minutes from `a` to `b`.
    ///
    /// Zero when `a == b`, the stored edge when one exists, otherwise the
    /// fallback default.
    #[inline]
    pub fn travel_time(&self, a: LocationId, b: LocationId) -> f64 {
        if a == b {
            return 0.0;
        }
        self.edges
            .get(&normalize_pair(a, b))
            .copied()
            .unwrap_or(self.default_minutes)
    }

    /// Arrival time of a route in minutes since midnight.
    ///
    /// Depends only on the route's own fields, never on its assignment.
    #[inline]
    pub fn arrival_minutes(&self, route: &Route) -> f64 {
        route.departure_time.as_minutes()
            + self.travel_time(route.start_location_id, route.end_location_id)
    }

    /// Whether an explicit edge exists for the pair.
    pub fn has_edge(&self, a: LocationId, b: LocationId) -> bool {
        self.edges.contains_key(&normalize_pair(a, b))
    }

    /// Fallback travel time in minutes.
    pub fn default_minutes(&self) -> f64 {
        self.default_minutes
    }

    /// Number of stored edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether no edges are stored.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl Default for TravelTimeMatrix {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DepartureTime;

    fn sample_matrix() -> TravelTimeMatrix {
        TravelTimeMatrix::from_edges(&[
            TravelTimeEdge::new(1, 2, 15.0),
            TravelTimeEdge::new(3, 2, 40.0),
            TravelTimeEdge::new(1, 4, 0.0),
        ])
    }

    #[test]
    fn test_symmetric_lookup() {
        let m = sample_matrix();
        for (a, b) in [(1, 2), (2, 3), (1, 4)] {
            assert_eq!(m.travel_time(a, b), m.travel_time(b, a));
        }
        assert_eq!(m.travel_time(3, 2), 40.0);
    }

    #[test]
    fn test_same_location_is_zero() {
        let m = sample_matrix().with_default(99.0);
        for loc in 0..6 {
            assert_eq!(m.travel_time(loc, loc), 0.0);
        }
    }

    #[test]
    fn test_fallback_for_missing_edge() {
        let m = sample_matrix();
        assert_eq!(m.travel_time(1, 3), DEFAULT_TRAVEL_MINUTES);
        assert_eq!(m.travel_time(4, 2), DEFAULT_TRAVEL_MINUTES);
        assert!(!m.has_edge(1, 3));

        let custom = sample_matrix().with_default(12.0);
        assert_eq!(custom.travel_time(1, 3), 12.0);
    }

    #[test]
    fn test_explicit_zero_is_not_fallback() {
        let m = sample_matrix();
        assert!(m.has_edge(4, 1));
        assert_eq!(m.travel_time(4, 1), 0.0);
    }

    #[test]
    fn test_set_overwrites_reverse_pair() {
        let mut m = sample_matrix();
        m.set_travel_time(2, 1, 25.0);
        assert_eq!(m.travel_time(1, 2), 25.0);
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn test_arrival_minutes() {
        let m = sample_matrix();
        let route = Route::new(1, 1, 2, DepartureTime::from_hm(8, 0).unwrap());
        assert_eq!(m.arrival_minutes(&route), 8.0 * 60.0 + 15.0);
    }
}
