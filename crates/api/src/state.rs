use std::sync::Arc;

use vitalwatch_pipeline::BatchCoordinator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Runs delivered batches through the pipeline.
    pub coordinator: Arc<BatchCoordinator>,
    /// Database pool when the PostgreSQL stores are in use; `None` for the
    /// in-memory stores.
    pub pool: Option<vitalwatch_db::DbPool>,
    pub config: Arc<ServerConfig>,
}
