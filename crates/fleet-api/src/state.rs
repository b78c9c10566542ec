//! Application state management

use crate::auth::OperatorSession;
use crate::config::ApiConfig;
use crate::routing::RouteClient;
use fleet_sim::{ChatLog, Fleet, FleetRegistry, HEAD_OFFICE};

use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: ApiConfig,
    /// The fleet; the write lock serializes refresh cycles
    pub fleet: Arc<RwLock<Fleet>>,
    /// Operator chat log
    pub chat: Arc<RwLock<ChatLog>>,
    /// Authenticated operator sessions, keyed by token
    pub sessions: Arc<DashMap<Uuid, OperatorSession>>,
    /// Directions provider client
    pub routes: RouteClient,
}

impl AppState {
    /// Create application state with the default seeded fleet
    pub fn new(config: ApiConfig) -> Self {
        let fleet = Fleet::new(
            FleetRegistry::seed_default(),
            HEAD_OFFICE,
            config.estimate.clone(),
        );
        info!("Initialized fleet with {} drivers", fleet.registry().len());

        let routes = RouteClient::new(&config.routing);

        Self {
            config,
            fleet: Arc::new(RwLock::new(fleet)),
            chat: Arc::new(RwLock::new(ChatLog::new())),
            sessions: Arc::new(DashMap::new()),
            routes,
        }
    }

    /// Number of authenticated operator sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
