//! Thin HTTP client for the external directions provider.
//!
//! Wraps the OpenRouteService GeoJSON directions endpoint behind a
//! time-bounded request. Every failure mode — timeout, HTTP error,
//! decode error, missing geometry — collapses to `None` so a provider
//! outage only suppresses the route polyline for that one driver.

use crate::config::RoutingConfig;
use fleet_core::Coordinate;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// Thin HTTP client for directions lookups
#[derive(Debug, Clone)]
pub struct RouteClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// LineString coordinates as [longitude, latitude] pairs
    coordinates: Vec<[f64; 2]>,
}

impl RouteClient {
    /// Create a client for the configured endpoint.
    ///
    /// Falls back to a default-configured reqwest client if the
    /// builder fails, so construction never blocks server startup.
    pub fn new(config: &RoutingConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|err| {
                warn!("Failed to build routing HTTP client: {}", err);
                reqwest::Client::new()
            });

        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Fetch the road path from origin to destination as (lat, lng)
    /// pairs. Returns `None` when no key is configured or the provider
    /// call fails for any reason.
    pub async fn directions(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Option<Vec<[f64; 2]>> {
        let api_key = self.api_key.as_ref()?;

        let url = format!(
            "{}/v2/directions/driving-car?api_key={}&start={},{}&end={},{}",
            self.endpoint,
            api_key,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude,
        );

        let response = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(err) => {
                warn!("Routing provider request failed: {}", err);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("Routing provider returned status {}", response.status());
            return None;
        }

        let body: DirectionsResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                warn!("Routing provider response decode failed: {}", err);
                return None;
            }
        };

        extract_path(body)
    }
}

/// Pull the first feature's LineString out of the GeoJSON response,
/// flipping [lng, lat] into [lat, lng] for the map layer.
fn extract_path(body: DirectionsResponse) -> Option<Vec<[f64; 2]>> {
    let feature = body.features.into_iter().next()?;
    if feature.geometry.coordinates.is_empty() {
        return None;
    }
    Some(
        feature
            .geometry
            .coordinates
            .into_iter()
            .map(|[lng, lat]| [lat, lng])
            .collect(),
    )
}

// ============================================================================
// TESTS
// ============================================================================
