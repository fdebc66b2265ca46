use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::FileStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: broker_db::DbPool,
    /// Server configuration (session secret is read by the permission gate).
    pub config: Arc<ServerConfig>,
    /// Upload key and report location backend.
    pub storage: Arc<dyn FileStorage>,
}
