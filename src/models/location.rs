//! Location and travel-time edge models.
//!
//! Travel times are undirected: an edge between A and B is stored once,
//! with the lower location ID first, and applies in both directions.

use serde::{Deserialize, Serialize};

/// Location identifier.
pub type LocationId = u32;

/// A named place where routes start or end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Unique location identifier.
    pub id: LocationId,
    /// Human-readable name.
    pub name: String,
}

impl Location {
    /// Creates a location.
    pub fn new(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Undirected travel duration between two locations.
///
/// Construct through [`TravelTimeEdge::new`] to get the normalized
/// (lower ID first) form. Deserialized edges are normalized when loaded
/// into a [`TravelTimeMatrix`](super::TravelTimeMatrix).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelTimeEdge {
    /// Lower location ID of the pair.
    pub from_location_id: LocationId,
    /// Higher location ID of the pair.
    pub to_location_id: LocationId,
    /// Travel duration in minutes.
    pub travel_minutes: f64,
}

impl TravelTimeEdge {
    /// Creates an edge, normalizing the pair so the lower ID comes first.
    pub fn new(a: LocationId, b: LocationId, travel_minutes: f64) -> Self {
        let (from, to) = normalize_pair(a, b);
        Self {
            from_location_id: from,
            to_location_id: to,
            travel_minutes,
        }
    }

    /// The normalized `(lower, higher)` key of this edge.
    #[inline]
    pub fn key(&self) -> (LocationId, LocationId) {
        normalize_pair(self.from_location_id, self.to_location_id)
    }

    /// Whether both endpoints are the same location.
    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.from_location_id == self.to_location_id
    }
}

/// Orders a location pair so the lower ID comes first.
#[inline]
pub fn normalize_pair(a: LocationId, b: LocationId) -> (LocationId, LocationId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_is_normalized() {
        let e = TravelTimeEdge::new(9, 2, 45.0);
        assert_eq!(e.from_location_id, 2);
        assert_eq!(e.to_location_id, 9);
        assert_eq!(e.key(), (2, 9));
    }

    #[test]
    fn test_deserialized_edge_key_is_normalized() {
        let e: TravelTimeEdge = serde_json::from_str(
            r#"{"from_location_id": 5, "to_location_id": 1, "travel_minutes": 12.5}"#,
        )
        .unwrap();
        assert_eq!(e.key(), (1, 5));
    }

    #[test]
    fn test_self_loop() {
        assert!(TravelTimeEdge::new(3, 3, 1.0).is_self_loop());
        assert!(!TravelTimeEdge::new(3, 4, 1.0).is_self_loop());
    }
}
