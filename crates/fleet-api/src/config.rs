//! API server configuration

use fleet_sim::EstimateConfig;
use serde::Deserialize;

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// REST API port
    pub api_port: u16,
    /// Enable CORS for all origins (development)
    pub cors_permissive: bool,
    /// Routing provider settings
    pub routing: RoutingConfig,
    /// Estimation engine constants
    pub estimate: EstimateConfig,
}

/// Routing provider (directions API) settings
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    /// Base endpoint, e.g. `https://api.openrouteservice.org`
    pub endpoint: String,
    /// API key; unset disables route geometry entirely
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_port: 3000,
            cors_permissive: true,
            routing: RoutingConfig::default(),
            estimate: EstimateConfig::default(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openrouteservice.org".to_string(),
            api_key: None,
            timeout_secs: 3,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = EstimateConfig::default();
        let estimate = EstimateConfig {
            average_speed_kmh: env_parse("AVERAGE_SPEED_KMH", defaults.average_speed_kmh),
            cost_per_km: env_parse("COST_PER_KM", defaults.cost_per_km),
            emission_factor: env_parse("EMISSION_FACTOR", defaults.emission_factor),
            arrival_threshold_km: env_parse("ARRIVAL_THRESHOLD_KM", defaults.arrival_threshold_km),
            step_size: env_parse("STEP_SIZE", defaults.step_size),
        };

        let routing = RoutingConfig {
            endpoint: std::env::var("ROUTING_ENDPOINT")
                .unwrap_or_else(|_| RoutingConfig::default().endpoint),
            api_key: std::env::var("ROUTING_API_KEY").ok().filter(|k| !k.is_empty()),
            timeout_secs: env_parse("ROUTING_TIMEOUT_SECS", 3),
        };

        Self {
            api_port: env_parse("API_PORT", 3000),
            cors_permissive: std::env::var("CORS_PERMISSIVE")
                .map(|s| s == "true" || s == "1")
                .unwrap_or(true),
            routing,
            estimate,
        }
    }
}
