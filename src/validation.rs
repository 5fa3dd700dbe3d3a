//! Input validation for rostering runs.
//!
//! Checks the four input collections before any optimization work.
//! Detects:
//! - Empty collections
//! - Duplicate IDs
//! - Routes or travel-time edges referencing unknown locations
//! - Self-loop and duplicate travel-time edges
//! - Negative or non-finite travel times

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Driver, Location, Route, TravelTimeEdge};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required input collection is empty.
    EmptyCollection,
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// A route or edge references a location that doesn't exist.
    UnknownLocation,
    /// A travel-time edge connects a location to itself.
    SelfLoopEdge,
    /// More than one travel-time edge for the same unordered pair.
    DuplicateEdge,
    /// Travel time is negative, NaN or infinite.
    InvalidTravelTime,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the inputs of a rostering run.
///
/// Checks:
/// 1. Drivers, locations, travel-time edges and routes are all non-empty
/// 2. No duplicate driver, location or route IDs
/// 3. Every route endpoint and edge endpoint is a known location
/// 4. No edge from a location to itself
/// 5. At most one edge per unordered location pair
/// 6. Travel times are finite and non-negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    drivers: &[Driver],
    locations: &[Location],
    edges: &[TravelTimeEdge],
    routes: &[Route],
) -> ValidationResult {
    let mut errors = Vec::new();

    for (name, empty) in [
        ("drivers", drivers.is_empty()),
        ("locations", locations.is_empty()),
        ("travel times", edges.is_empty()),
        ("routes", routes.is_empty()),
    ] {
        if empty {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCollection,
                format!("No {name} supplied"),
            ));
        }
    }

    let mut driver_ids = HashSet::new();
    for d in drivers {
        if !driver_ids.insert(d.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate driver ID: {}", d.id),
            ));
        }
    }

    let mut location_ids = HashSet::new();
    for l in locations {
        if !location_ids.insert(l.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate location ID: {}", l.id),
            ));
        }
    }

    let mut edge_keys = HashSet::new();
    for e in edges {
        let (a, b) = e.key();
        for loc in [a, b] {
            if !location_ids.contains(&loc) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownLocation,
                    format!("Travel time {a}-{b} references unknown location {loc}"),
                ));
            }
        }
        if e.is_self_loop() {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfLoopEdge,
                format!("Travel time connects location {a} to itself"),
            ));
        }
        if !edge_keys.insert((a, b)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateEdge,
                format!("Duplicate travel time for locations {a}-{b}"),
            ));
        }
        if !e.travel_minutes.is_finite() || e.travel_minutes < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTravelTime,
                format!("Travel time {a}-{b} is invalid: {}", e.travel_minutes),
            ));
        }
    }

    let mut route_ids = HashSet::new();
    for r in routes {
        if !route_ids.insert(r.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate route ID: {}", r.id),
            ));
        }
        for loc in [r.start_location_id, r.end_location_id] {
            if !location_ids.contains(&loc) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownLocation,
                    format!("Route {} references unknown location {loc}", r.id),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_drivers() -> Vec<Driver> {
        vec![Driver::new(1, "Anna"), Driver::new(2, "Boris")]
    }

    fn sample_locations() -> Vec<Location> {
        vec![
            Location::new(1, "Depot"),
            Location::new(2, "Airport"),
            Location::new(3, "Station"),
        ]
    }

    fn sample_edges() -> Vec<TravelTimeEdge> {
        vec![TravelTimeEdge::new(1, 2, 40.0), TravelTimeEdge::new(2, 3, 25.0)]
    }

    fn sample_routes() -> Vec<Route> {
        vec![
            Route::parse(1, 1, 2, "08:00").unwrap(),
            Route::parse(2, 2, 3, "10:00").unwrap(),
        ]
    }

    fn kinds(errors: &[ValidationError]) -> Vec<ValidationErrorKind> {
        errors.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(
            &sample_drivers(),
            &sample_locations(),
            &sample_edges(),
            &sample_routes()
        )
        .is_ok());
    }

    #[test]
    fn test_each_empty_collection_is_reported() {
        let errors = validate_input(&[], &sample_locations(), &sample_edges(), &sample_routes())
            .unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::EmptyCollection]);
        assert!(errors[0].message.contains("drivers"));

        let errors = validate_input(&sample_drivers(), &sample_locations(), &[], &sample_routes())
            .unwrap_err();
        assert!(errors[0].message.contains("travel times"));

        let errors =
            validate_input(&sample_drivers(), &sample_locations(), &sample_edges(), &[])
                .unwrap_err();
        assert!(errors[0].message.contains("routes"));
    }

    #[test]
    fn test_all_empty() {
        let errors = validate_input(&[], &[], &[], &[]).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::EmptyCollection));
    }

    #[test]
    fn test_duplicate_ids() {
        let drivers = vec![Driver::new(1, "Anna"), Driver::new(1, "Anna again")];
        let mut routes = sample_routes();
        routes.push(Route::parse(1, 1, 3, "12:00").unwrap());

        let errors =
            validate_input(&drivers, &sample_locations(), &sample_edges(), &routes).unwrap_err();
        let dups: Vec<_> = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::DuplicateId)
            .collect();
        assert_eq!(dups.len(), 2);
        assert!(dups.iter().any(|e| e.message.contains("driver")));
        assert!(dups.iter().any(|e| e.message.contains("route")));
    }

    #[test]
    fn test_unknown_location_in_route() {
        let routes = vec![Route::parse(1, 1, 42, "08:00").unwrap()];
        let errors = validate_input(
            &sample_drivers(),
            &sample_locations(),
            &sample_edges(),
            &routes,
        )
        .unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::UnknownLocation]);
        assert!(errors[0].message.contains("42"));
    }

    #[test]
    fn test_bad_edges() {
        let edges = vec![
            TravelTimeEdge::new(1, 1, 5.0),
            TravelTimeEdge::new(1, 2, 10.0),
            TravelTimeEdge::new(2, 1, 12.0),
            TravelTimeEdge::new(2, 3, -1.0),
            TravelTimeEdge::new(3, 9, 5.0),
        ];
        let errors = validate_input(
            &sample_drivers(),
            &sample_locations(),
            &edges,
            &sample_routes(),
        )
        .unwrap_err();
        let k = kinds(&errors);
        assert!(k.contains(&ValidationErrorKind::SelfLoopEdge));
        assert!(k.contains(&ValidationErrorKind::DuplicateEdge));
        assert!(k.contains(&ValidationErrorKind::InvalidTravelTime));
        assert!(k.contains(&ValidationErrorKind::UnknownLocation));
    }

    #[test]
    fn test_nan_travel_time() {
        let edges = vec![TravelTimeEdge::new(1, 2, f64::NAN)];
        let errors = validate_input(
            &sample_drivers(),
            &sample_locations(),
            &edges,
            &sample_routes(),
        )
        .unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::InvalidTravelTime]);
    }
}
