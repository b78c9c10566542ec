//! Geographic types and calculations for driver positioning

use serde::{Deserialize, Serialize};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic coordinate with latitude and longitude in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Default for Coordinate {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

impl Coordinate {
    /// Create a new coordinate
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Calculate distance to another coordinate using the Haversine formula.
    /// Returns distance in kilometers.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lng = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    /// Euclidean magnitude of the raw-degree delta to another coordinate.
    ///
    /// This is the planar metric the step rule operates in, not a
    /// geodesic distance.
    pub fn planar_distance_to(&self, other: &Coordinate) -> f64 {
        let dlat = other.latitude - self.latitude;
        let dlng = other.longitude - self.longitude;
        (dlat * dlat + dlng * dlng).sqrt()
    }

    /// Move one fixed-size step toward a target coordinate.
    ///
    /// The step happens in raw coordinate space: the delta is measured
    /// in degrees and normalized with plain Euclidean geometry. Within
    /// `step` of the target (including sitting exactly on it) no
    /// movement occurs; the position is never snapped onto the target.
    pub fn step_toward(&self, target: &Coordinate, step: f64) -> Coordinate {
        let dlat = target.latitude - self.latitude;
        let dlng = target.longitude - self.longitude;
        let d = (dlat * dlat + dlng * dlng).sqrt();

        if d >= step && d > 0.0 {
            Coordinate::new(
                self.latitude + dlat / d * step,
                self.longitude + dlng / d * step,
            )
        } else {
            *self
        }
    }

    /// Calculate initial bearing to another coordinate.
    /// Returns bearing in degrees (0-360).
    pub fn bearing_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lng = (other.longitude - self.longitude).to_radians();

        let y = delta_lng.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();

        let bearing = y.atan2(x).to_degrees();
        (bearing + 360.0) % 360.0
    }

    /// Convert to (latitude, longitude) tuple
    pub fn to_tuple(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_commutative() {
        let a = Coordinate::new(-6.20000, 106.81667);
        let b = Coordinate::new(-6.21462, 106.84513);

        let ab = a.distance_to(&b);
        let ba = b.distance_to(&a);

        assert!((ab - ba).abs() < 1e-12);
        assert!(ab > 0.0);
    }

    #[test]
    fn test_distance_zero_for_same_point() {
        let a = Coordinate::new(-6.21462, 106.84513);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_distance_jakarta_example() {
        // Budi's start to the head office, approximately 3.54 km
        let start = Coordinate::new(-6.20000, 106.81667);
        let office = Coordinate::new(-6.21462, 106.84513);

        let distance = start.distance_to(&office);
        assert!((distance - 3.54).abs() < 0.01);
    }

    #[test]
    fn test_step_toward_reduces_planar_distance_by_step() {
        let start = Coordinate::new(-6.20000, 106.81667);
        let office = Coordinate::new(-6.21462, 106.84513);
        let step = 0.001;

        let before = start.planar_distance_to(&office);
        let moved = start.step_toward(&office, step);
        let after = moved.planar_distance_to(&office);

        assert!((before - after - step).abs() < 1e-9);
    }

    #[test]
    fn test_step_toward_preserves_direction() {
        let start = Coordinate::new(0.0, 0.0);
        let target = Coordinate::new(3.0, 4.0);

        let moved = start.step_toward(&target, 0.5);

        // Direction vector (3,4)/5 scaled by 0.5
        assert!((moved.latitude - 0.3).abs() < 1e-12);
        assert!((moved.longitude - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_step_toward_within_threshold_is_noop() {
        let start = Coordinate::new(0.0005, 0.0);
        let target = Coordinate::new(0.0, 0.0);

        let moved = start.step_toward(&target, 0.001);
        assert_eq!(moved, start);
    }

    #[test]
    fn test_step_toward_at_target_is_noop() {
        let here = Coordinate::new(-6.21462, 106.84513);
        let moved = here.step_toward(&here, 0.001);

        assert_eq!(moved, here);
        assert!(moved.latitude.is_finite());
        assert!(moved.longitude.is_finite());
    }

    #[test]
    fn test_bearing_calculation() {
        let origin = Coordinate::new(0.0, 0.0);
        let north = Coordinate::new(1.0, 0.0);
        let east = Coordinate::new(0.0, 1.0);

        assert!((origin.bearing_to(&north) - 0.0).abs() < 1.0);
        assert!((origin.bearing_to(&east) - 90.0).abs() < 1.0);
    }
}
