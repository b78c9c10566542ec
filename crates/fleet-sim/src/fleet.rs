//! Refresh cycle orchestration and fleet snapshots

use crate::estimate::{estimate, Estimate, EstimateConfig};
use crate::registry::{FleetRegistry, HEAD_OFFICE};
use chrono::{DateTime, Utc};
use fleet_core::{Coordinate, CoreResult, Driver, DriverStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The fleet: registry, destination, and estimation constants.
///
/// Constructed once at startup and exclusively owned by the refresh
/// driver; all mutation flows through `refresh` and `set_status`.
#[derive(Debug)]
pub struct Fleet {
    registry: FleetRegistry,
    head_office: Coordinate,
    config: EstimateConfig,
    refresh_count: u64,
}

impl Fleet {
    pub fn new(registry: FleetRegistry, head_office: Coordinate, config: EstimateConfig) -> Self {
        Self {
            registry,
            head_office,
            config,
            refresh_count: 0,
        }
    }

    /// Fleet seeded with the five demo drivers and default constants
    pub fn with_defaults() -> Self {
        Self::new(
            FleetRegistry::seed_default(),
            HEAD_OFFICE,
            EstimateConfig::default(),
        )
    }

    pub fn registry(&self) -> &FleetRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EstimateConfig {
        &self.config
    }

    pub fn head_office(&self) -> Coordinate {
        self.head_office
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    /// Set a driver's movement status (the operator toggle)
    pub fn set_status(&mut self, name: &str, status: DriverStatus) -> CoreResult<()> {
        self.registry.set_status(name, status)
    }

    /// Look up a driver together with its current estimate
    pub fn driver_with_estimate(&self, name: &str) -> CoreResult<(&Driver, Estimate)> {
        let driver = self.registry.get(name)?;
        let bundle = estimate(&driver.position, &self.head_office, &self.config);
        Ok((driver, bundle))
    }

    /// Snapshot a single driver, computing its estimate once
    pub fn driver_snapshot(&self, name: &str) -> CoreResult<DriverSnapshot> {
        let (driver, bundle) = self.driver_with_estimate(name)?;
        Ok(DriverSnapshot::with_estimate(driver, &self.head_office, bundle))
    }

    /// Run one refresh cycle: advance every Moving driver one step,
    /// then rebuild the snapshot. Callers must serialize refreshes;
    /// the API layer does so with a write lock.
    pub fn refresh(&mut self) -> FleetSnapshot {
        let step = self.config.step_size;
        let office = self.head_office;
        let mut advanced = 0usize;

        for driver in self.registry.iter_mut() {
            if driver.is_moving() {
                driver.advance(&office, step);
                advanced += 1;
                debug!(
                    "Advanced {} to ({:.5}, {:.5})",
                    driver.name, driver.position.latitude, driver.position.longitude
                );
            }
        }

        self.refresh_count += 1;
        info!(
            "Refresh cycle {} complete, {} driver(s) advanced",
            self.refresh_count, advanced
        );

        self.snapshot()
    }

    /// Build the current view without advancing anyone
    pub fn snapshot(&self) -> FleetSnapshot {
        let drivers: Vec<DriverSnapshot> = self
            .registry
            .all()
            .iter()
            .map(|d| DriverSnapshot::from_driver(d, &self.head_office, &self.config))
            .collect();

        let ranking = rank_by_eta(&drivers);

        FleetSnapshot {
            drivers,
            ranking,
            timestamp: Utc::now(),
        }
    }
}

/// Driver names ordered by ETA ascending; stable sort, so insertion
/// order breaks ties.
fn rank_by_eta(drivers: &[DriverSnapshot]) -> Vec<String> {
    let mut ranked: Vec<&DriverSnapshot> = drivers.iter().collect();
    ranked.sort_by_key(|d| d.estimate.eta_minutes);
    ranked.iter().map(|d| d.name.clone()).collect()
}

/// Complete fleet state snapshot for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub drivers: Vec<DriverSnapshot>,
    /// Driver names sorted by ETA ascending
    pub ranking: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Snapshot of one driver with its derived metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverSnapshot {
    pub name: String,
    pub supplier: String,
    pub marker_color: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Initial bearing toward the head office, for marker rotation
    pub heading: f64,
    pub status: String,
    pub estimate: Estimate,
}

impl DriverSnapshot {
    pub fn from_driver(
        driver: &Driver,
        head_office: &Coordinate,
        config: &EstimateConfig,
    ) -> Self {
        let bundle = estimate(&driver.position, head_office, config);
        Self::with_estimate(driver, head_office, bundle)
    }

    /// Build a snapshot around an estimate the caller already holds
    pub fn with_estimate(driver: &Driver, head_office: &Coordinate, estimate: Estimate) -> Self {
        Self {
            name: driver.name.clone(),
            supplier: driver.supplier.clone(),
            marker_color: driver.marker_color.clone(),
            latitude: driver.position.latitude,
            longitude: driver.position.longitude,
            heading: driver.position.bearing_to(head_office),
            status: driver.status.to_string(),
            estimate,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
