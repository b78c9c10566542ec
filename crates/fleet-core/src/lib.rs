//! # Fleet Core
//!
//! Core domain models for the Driver Fleet Tracking Server.
//! This crate provides the shared types used across all server crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod error;
pub mod geo;

pub use error::{CoreError, CoreResult};
pub use geo::Coordinate;

/// Maximum retained history entries per driver
pub const HISTORY_CAPACITY: usize = 100;

// ============================================================================
// DRIVER MODELS
// ============================================================================

/// Movement status of a driver.
///
/// Toggled externally by the operator; never derived from position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    /// Driver is parked at the supplier, not advancing
    Waiting,
    /// Driver advances one step toward the head office per refresh
    Moving,
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverStatus::Waiting => write!(f, "WAITING"),
            DriverStatus::Moving => write!(f, "MOVING"),
        }
    }
}

impl Default for DriverStatus {
    fn default() -> Self {
        Self::Waiting
    }
}

/// A single recorded position of a driver
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub position: Coordinate,
}

/// A delivery driver tracked by the fleet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    /// Unique driver name, stable for the process lifetime
    pub name: String,
    /// Current position; mutated only via the step rule
    pub position: Coordinate,
    /// Supplier the driver is dispatched from
    pub supplier: String,
    /// Map marker color hint for the dashboard
    pub marker_color: String,
    pub status: DriverStatus,
    /// Append-only position log, most recent 100 entries
    pub history: Vec<HistoryEntry>,
}

impl Driver {
    pub fn new(
        name: impl Into<String>,
        position: Coordinate,
        supplier: impl Into<String>,
        marker_color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            supplier: supplier.into(),
            marker_color: marker_color.into(),
            status: DriverStatus::default(),
            history: Vec::new(),
        }
    }

    /// Advance one step toward the target using the planar step rule.
    ///
    /// A step that leaves the position unchanged (already within `step`
    /// of the target) records nothing in the history.
    pub fn advance(&mut self, target: &Coordinate, step: f64) {
        let next = self.position.step_toward(target, step);
        if next != self.position {
            self.position = next;
            self.history.push(HistoryEntry {
                timestamp: Utc::now(),
                position: next,
            });
            if self.history.len() > HISTORY_CAPACITY {
                self.history.remove(0);
            }
        }
    }

    /// Check whether the driver is flagged to move on the next refresh
    pub fn is_moving(&self) -> bool {
        self.status == DriverStatus::Moving
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_driver() -> Driver {
        Driver::new(
            "Budi",
            Coordinate::new(-6.20000, 106.81667),
            "PT Merah Jaya",
            "red",
        )
    }

    #[test]
    fn test_driver_creation() {
        let driver = test_driver();
        assert_eq!(driver.name, "Budi");
        assert_eq!(driver.supplier, "PT Merah Jaya");
        assert_eq!(driver.status, DriverStatus::Waiting);
        assert!(driver.history.is_empty());
    }

    #[test]
    fn test_advance_moves_and_records_history() {
        let mut driver = test_driver();
        let office = Coordinate::new(-6.21462, 106.84513);
        let before = driver.position;

        driver.advance(&office, 0.001);

        assert_ne!(driver.position, before);
        assert_eq!(driver.history.len(), 1);
        assert_eq!(driver.history[0].position, driver.position);
    }

    #[test]
    fn test_advance_within_threshold_records_nothing() {
        let office = Coordinate::new(-6.21462, 106.84513);
        let mut driver = Driver::new(
            "Gaga",
            Coordinate::new(-6.21462 + 0.0004, 106.84513),
            "UD Hijau Mandiri",
            "green",
        );

        driver.advance(&office, 0.001);

        assert_eq!(driver.position.latitude, -6.21462 + 0.0004);
        assert!(driver.history.is_empty());
    }

    #[test]
    fn test_history_capped_at_capacity() {
        let mut driver = test_driver();
        // Far enough away that every step is an effective move
        let office = Coordinate::new(60.0, 106.84513);

        for _ in 0..(HISTORY_CAPACITY + 20) {
            driver.advance(&office, 0.001);
        }

        assert_eq!(driver.history.len(), HISTORY_CAPACITY);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(DriverStatus::Waiting.to_string(), "WAITING");
        assert_eq!(DriverStatus::Moving.to_string(), "MOVING");
    }
}
