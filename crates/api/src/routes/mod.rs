pub mod batches;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /batches                                         process a stream batch (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/batches", batches::router())
}
