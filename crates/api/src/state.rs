use std::sync::Arc;

use stationhub_core::ranking::SiteRanker;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: stationhub_db::DbPool,
    /// Server configuration (upload limits, JWT settings).
    pub config: Arc<ServerConfig>,
    /// Site ranking engine with its fixed weight tables.
    pub ranker: Arc<SiteRanker>,
}

impl AppState {
    pub fn new(pool: stationhub_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            ranker: Arc::new(SiteRanker::default()),
        }
    }
}
