//! Canned query responder for the operator chat panel

use crate::estimate::{ArrivalStatus, Estimate};
use fleet_core::{Driver, DriverStatus};
use serde::{Deserialize, Serialize};

/// Distance above which a delivery obstacle reads as a traffic jam, in km
const OBSTACLE_DISTANCE_KM: f64 = 2.0;

/// Reply used for any question/driver combination with no defined rule
const FALLBACK_REPLY: &str = "Driver is currently en route.";

/// The fixed set of questions an operator can send to a driver.
///
/// An enum rather than a string-keyed table, so adding or removing a
/// question is a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Question {
    /// "Has it arrived?"
    HasArrived,
    /// "Is there a delivery obstacle?"
    DeliveryObstacle,
    /// "How long until arrival?"
    EtaQuery,
    /// "Why hasn't it departed?"
    WhyNotDeparted,
    /// Fixed motivational prompt
    StayAlert,
}

impl Question {
    /// Human-readable question text, as shown in the chat log
    pub fn text(&self) -> &'static str {
        match self {
            Question::HasArrived => "Has it arrived?",
            Question::DeliveryObstacle => "Is there a delivery obstacle?",
            Question::EtaQuery => "How long until arrival?",
            Question::WhyNotDeparted => "Why hasn't it departed?",
            Question::StayAlert => "Stay alert out there!",
        }
    }
}

/// Select the canned reply for a question about a driver.
///
/// A pure lookup over the driver's current distance and status.
pub fn respond(question: Question, driver: &Driver, estimate: &Estimate) -> String {
    match question {
        Question::HasArrived => match estimate.arrival {
            ArrivalStatus::Arrived => "Arrived".to_string(),
            ArrivalStatus::InTransit => "Not arrived yet".to_string(),
        },
        Question::DeliveryObstacle => {
            if estimate.distance_km > OBSTACLE_DISTANCE_KM {
                "Traffic jam ahead".to_string()
            } else {
                "Accident on the route".to_string()
            }
        }
        Question::EtaQuery => format!("About {} minutes to go", estimate.eta_minutes),
        Question::WhyNotDeparted => {
            if driver.status == DriverStatus::Waiting {
                "Still loading goods at the supplier".to_string()
            } else {
                FALLBACK_REPLY.to_string()
            }
        }
        Question::StayAlert => "Wide awake and rolling!".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{estimate, EstimateConfig};
    use crate::registry::HEAD_OFFICE;
    use fleet_core::{Coordinate, Driver};

    fn driver_at_km(km: f64) -> (Driver, Estimate) {
        let deg = km / (6371.0 * std::f64::consts::PI / 180.0);
        let position = Coordinate::new(HEAD_OFFICE.latitude - deg, HEAD_OFFICE.longitude);
        let driver = Driver::new("Budi", position, "PT Merah Jaya", "red");
        let bundle = estimate(&position, &HEAD_OFFICE, &EstimateConfig::default());
        (driver, bundle)
    }

    #[test]
    fn test_has_arrived_near_and_far() {
        let (near_driver, near) = driver_at_km(0.3);
        let (far_driver, far) = driver_at_km(1.0);

        assert_eq!(respond(Question::HasArrived, &near_driver, &near), "Arrived");
        assert_eq!(
            respond(Question::HasArrived, &far_driver, &far),
            "Not arrived yet"
        );
    }

    #[test]
    fn test_obstacle_depends_on_distance() {
        let (far_driver, far) = driver_at_km(3.0);
        let (near_driver, near) = driver_at_km(1.0);

        assert_eq!(
            respond(Question::DeliveryObstacle, &far_driver, &far),
            "Traffic jam ahead"
        );
        assert_eq!(
            respond(Question::DeliveryObstacle, &near_driver, &near),
            "Accident on the route"
        );
    }

    #[test]
    fn test_eta_reply_embeds_minutes() {
        let (driver, bundle) = driver_at_km(10.0);
        let reply = respond(Question::EtaQuery, &driver, &bundle);
        assert_eq!(reply, format!("About {} minutes to go", bundle.eta_minutes));
    }

    #[test]
    fn test_why_not_departed_only_while_waiting() {
        let (mut driver, bundle) = driver_at_km(3.0);

        assert_eq!(
            respond(Question::WhyNotDeparted, &driver, &bundle),
            "Still loading goods at the supplier"
        );

        driver.status = DriverStatus::Moving;
        assert_eq!(
            respond(Question::WhyNotDeparted, &driver, &bundle),
            FALLBACK_REPLY
        );
    }

    #[test]
    fn test_stay_alert_is_constant() {
        let (driver, bundle) = driver_at_km(3.0);
        assert_eq!(
            respond(Question::StayAlert, &driver, &bundle),
            "Wide awake and rolling!"
        );
    }
}
