//! # Fleet API Server
//!
//! Main entry point for the Driver Fleet Tracking Server.
//! Serves the dashboard's JSON API: driver state and estimates,
//! refresh-driven simulation ticks, route lookups, the operator
//! session gate, and the canned chat responder.

mod auth;
mod config;
mod error;
mod handlers;
mod routes;
mod routing;
mod state;

use crate::config::ApiConfig;
use crate::routes::create_router;
use crate::state::AppState;

use std::net::SocketAddr;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("🚚 Starting Driver Fleet Tracking Server v{}", env!("CARGO_PKG_VERSION"));

    let config = ApiConfig::from_env();
    info!("Configuration loaded");
    info!("   API Port: {}", config.api_port);
    info!("   Routing endpoint: {}", config.routing.endpoint);
    info!(
        "   Routing key: {}",
        if config.routing.api_key.is_some() { "configured" } else { "absent (no route geometry)" }
    );

    let state = AppState::new(config.clone());
    let app = create_router(state);
    info!("Routes configured");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.api_port));
    info!("🚀 API server listening on http://{}", addr);
    info!("Metrics available at http://{}/metrics", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🛑 Server shutdown complete");
    Ok(())
}

/// Initialize logging with tracing
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fleet_api=debug,fleet_sim=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received terminate signal, shutting down...");
        }
    }
}
