//! API route definitions

use crate::handlers;
use crate::state::AppState;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = if state.config.cors_permissive {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .max_age(Duration::from_secs(3600))
    } else {
        CorsLayer::new()
            .allow_origin(["http://localhost:8080".parse().unwrap()])
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        // Health & Status
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/status", get(handlers::system_status))
        .route("/metrics", get(handlers::metrics))
        // Session gate
        .route("/api/v1/session/login", post(handlers::login))
        // Drivers API
        .route("/api/v1/drivers", get(handlers::list_drivers))
        .route("/api/v1/drivers/{name}", get(handlers::get_driver))
        .route(
            "/api/v1/drivers/{name}/status",
            put(handlers::set_driver_status),
        )
        .route("/api/v1/drivers/{name}/route", get(handlers::get_route))
        // Fleet API
        .route("/api/v1/fleet/refresh", post(handlers::refresh_fleet))
        .route("/api/v1/fleet/ranking", get(handlers::get_ranking))
        // Chat API
        .route("/api/v1/chat", post(handlers::post_chat).get(handlers::get_chat))
        // Apply middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}
