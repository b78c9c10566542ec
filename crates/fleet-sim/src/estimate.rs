//! Per-driver travel estimation

use fleet_core::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tunable constants for the estimation engine.
///
/// Every constant the engine uses is a field here so tests and
/// deployments can retune them without touching the formulas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateConfig {
    /// Assumed average travel speed in km/h
    pub average_speed_kmh: f64,
    /// Delivery cost per kilometer, in currency units
    pub cost_per_km: f64,
    /// Carbon emission factor in kg per kilometer
    pub emission_factor: f64,
    /// Distance below which a driver counts as arrived, in km
    pub arrival_threshold_km: f64,
    /// Per-refresh movement magnitude in raw coordinate degrees
    pub step_size: f64,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: 45.0,
            cost_per_km: 6000.0,
            emission_factor: 0.15,
            arrival_threshold_km: 0.5,
            step_size: 0.001,
        }
    }
}

/// Whether a driver has reached the head office
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArrivalStatus {
    Arrived,
    InTransit,
}

impl fmt::Display for ArrivalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrivalStatus::Arrived => write!(f, "ARRIVED"),
            ArrivalStatus::InTransit => write!(f, "IN_TRANSIT"),
        }
    }
}

/// Derived metrics for one driver at one position
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Estimate {
    /// Remaining distance to the head office, rounded to 2 decimals
    pub distance_km: f64,
    /// Estimated minutes to arrival, truncated
    pub eta_minutes: u32,
    /// Estimated delivery cost, truncated to whole currency units
    pub cost: u64,
    /// Estimated carbon emission in kg, rounded to 2 decimals
    pub carbon_kg: f64,
    pub arrival: ArrivalStatus,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derive the estimate bundle for a position relative to the head office.
///
/// Pure function of the inputs; nothing is cached.
pub fn estimate(
    position: &Coordinate,
    head_office: &Coordinate,
    config: &EstimateConfig,
) -> Estimate {
    let distance_km = round2(position.distance_to(head_office));
    let eta_minutes = (distance_km / config.average_speed_kmh * 60.0).trunc() as u32;
    let cost = (distance_km * config.cost_per_km).trunc() as u64;
    let carbon_kg = round2(distance_km * config.emission_factor);
    let arrival = if distance_km < config.arrival_threshold_km {
        ArrivalStatus::Arrived
    } else {
        ArrivalStatus::InTransit
    };

    Estimate {
        distance_km,
        eta_minutes,
        cost,
        carbon_kg,
        arrival,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// A coordinate that is `km` kilometers due south of `origin`.
    fn point_at_km(origin: &Coordinate, km: f64) -> Coordinate {
        // ~111.195 km per degree of latitude for the 6371 km radius
        let deg = km / (6371.0 * std::f64::consts::PI / 180.0);
        Coordinate::new(origin.latitude - deg, origin.longitude)
    }

    #[test]
    fn test_worked_example_at_ten_km() {
        let office = Coordinate::new(-6.21462, 106.84513);
        let position = point_at_km(&office, 10.0);
        let bundle = estimate(&position, &office, &EstimateConfig::default());

        assert!((bundle.distance_km - 10.0).abs() < 0.01);
        assert_eq!(bundle.eta_minutes, 13); // 10/45*60 = 13.33 truncated
        assert_eq!(bundle.cost, 60000);
        assert!((bundle.carbon_kg - 1.5).abs() < 0.01);
        assert_eq!(bundle.arrival, ArrivalStatus::InTransit);
    }

    #[test]
    fn test_arrival_below_threshold() {
        let office = Coordinate::new(-6.21462, 106.84513);
        let near = point_at_km(&office, 0.3);
        let bundle = estimate(&near, &office, &EstimateConfig::default());

        assert_eq!(bundle.arrival, ArrivalStatus::Arrived);
        assert_eq!(bundle.eta_minutes, 0);
    }

    #[test]
    fn test_estimate_is_pure() {
        let office = Coordinate::new(-6.21462, 106.84513);
        let position = Coordinate::new(-6.20000, 106.81667);
        let config = EstimateConfig::default();

        let first = estimate(&position, &office, &config);
        let second = estimate(&position, &office, &config);

        assert_eq!(first.distance_km, second.distance_km);
        assert_eq!(first.eta_minutes, second.eta_minutes);
        assert_eq!(first.cost, second.cost);
        assert_eq!(first.carbon_kg, second.carbon_kg);
        assert_eq!(first.arrival, second.arrival);
    }

    #[test]
    fn test_zero_distance() {
        let office = Coordinate::new(-6.21462, 106.84513);
        let bundle = estimate(&office, &office, &EstimateConfig::default());

        assert_eq!(bundle.distance_km, 0.0);
        assert_eq!(bundle.eta_minutes, 0);
        assert_eq!(bundle.cost, 0);
        assert_eq!(bundle.arrival, ArrivalStatus::Arrived);
    }

    #[test]
    fn test_custom_config() {
        let office = Coordinate::new(-6.21462, 106.84513);
        let position = point_at_km(&office, 10.0);
        let config = EstimateConfig {
            average_speed_kmh: 40.0,
            cost_per_km: 1000.0,
            emission_factor: 0.2,
            arrival_threshold_km: 15.0,
            ..Default::default()
        };

        let bundle = estimate(&position, &office, &config);

        assert_eq!(bundle.eta_minutes, 15);
        assert_eq!(bundle.cost, 10000);
        assert!((bundle.carbon_kg - 2.0).abs() < 0.01);
        assert_eq!(bundle.arrival, ArrivalStatus::Arrived);
    }
}
