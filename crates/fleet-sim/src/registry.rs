//! Fleet registry: the owned collection of drivers

use fleet_core::{Coordinate, CoreError, CoreResult, Driver, DriverStatus};
use tracing::debug;

/// The fixed destination all drivers move toward
pub const HEAD_OFFICE: Coordinate = Coordinate {
    latitude: -6.21462,
    longitude: 106.84513,
};

/// Owns all drivers for the process lifetime, keyed by unique name.
///
/// Iteration order is insertion order and stable across calls, which
/// the refresh cycle and the ranking table both rely on. Drivers are
/// registered once at startup and mutated in place, never removed.
#[derive(Debug, Default)]
pub struct FleetRegistry {
    drivers: Vec<Driver>,
}

impl FleetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the five demo drivers from the dashboard
    pub fn seed_default() -> Self {
        let mut registry = Self::new();
        let seeds = [
            ("Budi", -6.20000, 106.81667, "PT Merah Jaya", "red"),
            ("Fahmi", -6.23000, 106.80000, "CV Biru Abadi", "blue"),
            ("Gaga", -6.22000, 106.84000, "UD Hijau Mandiri", "green"),
            ("Fajar", -6.25000, 106.86000, "PT Oranye Sejahtera", "orange"),
            ("Ridwan", -6.24000, 106.83000, "CV Hitam Transport", "black"),
        ];

        for (name, lat, lng, supplier, color) in seeds {
            let driver = Driver::new(name, Coordinate::new(lat, lng), supplier, color);
            // Seed names are distinct by construction
            let _ = registry.register(driver);
        }

        registry
    }

    /// Register a driver. Fails if the name is already taken.
    pub fn register(&mut self, driver: Driver) -> CoreResult<()> {
        if self.drivers.iter().any(|d| d.name == driver.name) {
            return Err(CoreError::duplicate_driver(driver.name.as_str()));
        }
        debug!("Registered driver: {}", driver.name);
        self.drivers.push(driver);
        Ok(())
    }

    /// Look up a driver by name
    pub fn get(&self, name: &str) -> CoreResult<&Driver> {
        self.drivers
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| CoreError::driver_not_found(name))
    }

    /// Look up a driver by name, mutably
    pub fn get_mut(&mut self, name: &str) -> CoreResult<&mut Driver> {
        self.drivers
            .iter_mut()
            .find(|d| d.name == name)
            .ok_or_else(|| CoreError::driver_not_found(name))
    }

    /// All drivers, in insertion order
    pub fn all(&self) -> &[Driver] {
        &self.drivers
    }

    /// Iterate drivers mutably, in insertion order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Driver> {
        self.drivers.iter_mut()
    }

    /// Set a driver's movement status. Idempotent.
    pub fn set_status(&mut self, name: &str, status: DriverStatus) -> CoreResult<()> {
        let driver = self.get_mut(name)?;
        if driver.status != status {
            debug!("Driver {} status: {} -> {}", name, driver.status, status);
            driver.status = status;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
