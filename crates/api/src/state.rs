use std::sync::Arc;

use muzer_core::metadata::MetadataResolver;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Holds no vote data; every vote read goes to the database.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: muzer_db::DbPool,
    /// Server configuration (timeouts, JWT settings).
    pub config: Arc<ServerConfig>,
    /// Resolves submitted URLs into track metadata.
    pub resolver: Arc<dyn MetadataResolver>,
}
