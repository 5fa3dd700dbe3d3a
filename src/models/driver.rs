//! Driver model.
//!
//! Drivers are the resources routes are assigned to. A driver carries
//! no capacity or calendar; the optimizer only needs its identity and
//! a display name for the projected schedule.

use serde::{Deserialize, Serialize};

/// Driver identifier.
pub type DriverId = u32;

/// A driver that can be assigned routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    /// Unique driver identifier.
    pub id: DriverId,
    /// Human-readable name.
    pub name: String,
}

impl Driver {
    /// Creates a driver with the given ID and name.
    pub fn new(id: DriverId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Sets the driver name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
