//! API request handlers

use crate::auth::{validate_login, LoginRequest, OperatorSession};
use crate::error::ApiError;
use crate::state::AppState;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use fleet_core::{Coordinate, DriverStatus};
use fleet_sim::{respond, ChatMessage, DriverSnapshot, FleetSnapshot, Question};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

// ============================================================================
// RESPONSE TYPES
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub api: String,
    pub driver_count: usize,
    pub moving_count: usize,
    pub refresh_count: u64,
    pub operator_sessions: usize,
    pub routing_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct DriverListResponse {
    pub drivers: Vec<DriverSnapshot>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub name: String,
    pub status: DriverStatus,
}

#[derive(Debug, Serialize)]
pub struct RankingEntry {
    pub name: String,
    pub eta_minutes: u32,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub ranking: Vec<RankingEntry>,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub driver: String,
    /// Road path as [lat, lng] pairs, or null when the provider is
    /// unavailable (the dashboard then skips the polyline)
    pub path: Option<Vec<[f64; 2]>>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub name: String,
    pub department: String,
}

#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    pub status: DriverStatus,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub driver: String,
    pub question: Question,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub driver: String,
    pub question: String,
    pub reply: String,
}

// ============================================================================
// HEALTH & STATUS HANDLERS
// ============================================================================

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check (for orchestrators)
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let ready = !state.fleet.read().registry().is_empty();
    if ready {
        (StatusCode::OK, Json(serde_json::json!({"ready": true})))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({"ready": false})),
        )
    }
}

/// System status overview
pub async fn system_status(State(state): State<AppState>) -> impl IntoResponse {
    let fleet = state.fleet.read();
    let moving_count = fleet
        .registry()
        .all()
        .iter()
        .filter(|d| d.is_moving())
        .count();

    Json(StatusResponse {
        api: "running".into(),
        driver_count: fleet.registry().len(),
        moving_count,
        refresh_count: fleet.refresh_count(),
        operator_sessions: state.session_count(),
        routing_configured: state.config.routing.api_key.is_some(),
    })
}

/// Plain-text metrics endpoint
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let (driver_count, moving_count, refresh_count) = {
        let fleet = state.fleet.read();
        (
            fleet.registry().len(),
            fleet.registry().all().iter().filter(|d| d.is_moving()).count(),
            fleet.refresh_count(),
        )
    };

    let metrics = format!(
        r#"# HELP fleet_drivers_total Total number of drivers
# TYPE fleet_drivers_total gauge
fleet_drivers_total {}

# HELP fleet_drivers_moving Drivers currently flagged as moving
# TYPE fleet_drivers_moving gauge
fleet_drivers_moving {}

# HELP fleet_refresh_cycles_total Refresh cycles processed
# TYPE fleet_refresh_cycles_total counter
fleet_refresh_cycles_total {}

# HELP fleet_operator_sessions Authenticated operator sessions
# TYPE fleet_operator_sessions gauge
fleet_operator_sessions {}
"#,
        driver_count,
        moving_count,
        refresh_count,
        state.session_count(),
    );

    (StatusCode::OK, [("content-type", "text/plain")], metrics)
}

// ============================================================================
// SESSION HANDLERS
// ============================================================================

/// Operator login gate
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    validate_login(&request).map_err(ApiError::bad_request)?;

    let session = OperatorSession::new(request.name.as_str(), request.department.as_str());
    let response = LoginResponse {
        token: session.token,
        name: session.name.clone(),
        department: session.department.clone(),
    };

    info!("Operator {} logged in", session.name);
    state.sessions.insert(session.token, session);

    Ok(Json(response))
}

// ============================================================================
// DRIVER HANDLERS
// ============================================================================

/// List all drivers with their current estimates (no advancement)
pub async fn list_drivers(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.fleet.read().snapshot();
    let total = snapshot.drivers.len();
    Json(DriverListResponse {
        drivers: snapshot.drivers,
        total,
    })
}

/// Get a single driver by name
pub async fn get_driver(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DriverSnapshot>, ApiError> {
    let snapshot = state.fleet.read().driver_snapshot(&name)?;
    Ok(Json(snapshot))
}

/// Operator toggle: set a driver's movement status
pub async fn set_driver_status(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<StatusUpdateResponse>, ApiError> {
    state.fleet.write().set_status(&name, request.status)?;
    info!("Driver {} set to {}", name, request.status);

    Ok(Json(StatusUpdateResponse {
        name,
        status: request.status,
    }))
}

// ============================================================================
// FLEET HANDLERS
// ============================================================================

/// Run one refresh cycle and return the new snapshot.
///
/// The write lock serializes concurrent refresh triggers: each cycle
/// runs to completion before the next begins.
pub async fn refresh_fleet(State(state): State<AppState>) -> Json<FleetSnapshot> {
    Json(state.fleet.write().refresh())
}

/// Current ranking without advancing the simulation
pub async fn get_ranking(State(state): State<AppState>) -> Json<RankingResponse> {
    let snapshot = state.fleet.read().snapshot();
    let ranking = snapshot
        .ranking
        .iter()
        .filter_map(|name| {
            snapshot
                .drivers
                .iter()
                .find(|d| &d.name == name)
                .map(|d| RankingEntry {
                    name: d.name.clone(),
                    eta_minutes: d.estimate.eta_minutes,
                })
        })
        .collect();

    Json(RankingResponse { ranking })
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// Road path from a driver's position to the head office.
///
/// Provider failures are recovered here: the response carries a null
/// path and the refresh of other drivers is unaffected.
pub async fn get_route(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RouteResponse>, ApiError> {
    let (origin, office): (Coordinate, Coordinate) = {
        let fleet = state.fleet.read();
        let driver = fleet.registry().get(&name)?;
        (driver.position, fleet.head_office())
    };

    let path = state.routes.directions(&origin, &office).await;

    Ok(Json(RouteResponse { driver: name, path }))
}

// ============================================================================
// CHAT HANDLERS
// ============================================================================

/// Send a canned question to a driver and receive the scripted reply
pub async fn post_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let reply = {
        let fleet = state.fleet.read();
        let (driver, estimate) = fleet.driver_with_estimate(&request.driver)?;
        respond(request.question, driver, &estimate)
    };

    let mut chat = state.chat.write();
    chat.push_user(format!("@{}, {}", request.driver, request.question.text()));
    chat.push_assistant(format!("@{}: {}", request.driver, reply));

    Ok(Json(ChatResponse {
        driver: request.driver,
        question: request.question.text().to_string(),
        reply,
    }))
}

/// The chat log, oldest first
pub async fn get_chat(State(state): State<AppState>) -> Json<Vec<ChatMessage>> {
    Json(state.chat.read().messages().to_vec())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    fn test_state() -> AppState {
        AppState::new(ApiConfig::default())
    }

    #[tokio::test]
    async fn test_login_accepts_valid_credentials() {
        let state = test_state();
        let request = LoginRequest {
            name: "Siti Rahma".into(),
            department: "Shipping".into(),
            work_code: "TRA-12345".into(),
        };

        let response = login(State(state.clone()), Json(request)).await.unwrap();
        assert_eq!(response.0.name, "Siti Rahma");
        assert_eq!(state.session_count(), 1);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_work_code() {
        let state = test_state();
        let request = LoginRequest {
            name: "Siti".into(),
            department: "Shipping".into(),
            work_code: "TRA-12".into(),
        };

        let err = login(State(state.clone()), Json(request)).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert_eq!(state.session_count(), 0);
    }

    #[tokio::test]
    async fn test_get_driver_returns_snapshot_with_estimate() {
        let state = test_state();
        let snapshot = get_driver(State(state), Path("Budi".into())).await.unwrap();

        assert_eq!(snapshot.0.name, "Budi");
        assert_eq!(snapshot.0.supplier, "PT Merah Jaya");
        assert!((snapshot.0.estimate.distance_km - 3.54).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_get_driver_unknown_is_not_found() {
        let state = test_state();
        let err = get_driver(State(state), Path("unknown".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_refresh_moves_only_flagged_drivers() {
        let state = test_state();
        let before = state.fleet.read().registry().get("Budi").unwrap().position;

        set_driver_status(
            State(state.clone()),
            Path("Budi".into()),
            Json(StatusUpdateRequest {
                status: DriverStatus::Moving,
            }),
        )
        .await
        .unwrap();

        let snapshot = refresh_fleet(State(state.clone())).await;
        assert_eq!(snapshot.0.drivers.len(), 5);

        let after = state.fleet.read().registry().get("Budi").unwrap().position;
        assert_ne!(before, after);

        let fahmi = state.fleet.read().registry().get("Fahmi").unwrap().position;
        assert_eq!(fahmi, Coordinate::new(-6.23000, 106.80000));
    }

    #[tokio::test]
    async fn test_ranking_is_eta_ascending() {
        let state = test_state();
        let response = get_ranking(State(state)).await;

        let etas: Vec<u32> = response.0.ranking.iter().map(|e| e.eta_minutes).collect();
        assert_eq!(etas.len(), 5);
        assert!(etas.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_chat_appends_to_log() {
        let state = test_state();
        let request = ChatRequest {
            driver: "Budi".into(),
            question: Question::HasArrived,
        };

        let response = post_chat(State(state.clone()), Json(request)).await.unwrap();
        assert_eq!(response.0.reply, "Not arrived yet");

        let log = get_chat(State(state)).await;
        assert_eq!(log.0.len(), 2);
        assert!(log.0[0].content.contains("@Budi"));
    }

    #[tokio::test]
    async fn test_chat_unknown_driver_is_not_found() {
        let state = test_state();
        let request = ChatRequest {
            driver: "unknown".into(),
            question: Question::StayAlert,
        };

        let err = post_chat(State(state), Json(request)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_route_without_provider_key_has_null_path() {
        let state = test_state();
        let response = get_route(State(state), Path("Budi".into())).await.unwrap();

        assert_eq!(response.0.driver, "Budi");
        assert!(response.0.path.is_none());
    }
}
