use axum::routing::post;
use axum::Router;

use crate::handlers::batches;
use crate::state::AppState;

/// Batch ingress routes mounted at `/batches`.
///
/// ```text
/// POST / -> process_batch
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(batches::process_batch))
}
