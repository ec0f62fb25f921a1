//! Handler for stream batch delivery.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use vitalwatch_pipeline::{BatchStatus, StreamEvent};

use crate::error::AppResult;
use crate::response::BatchResponse;
use crate::state::AppState;

/// POST /api/v1/batches
///
/// Run every record of the delivered batch through the pipeline.
///
/// Always 200 once the envelope parses: per-record failures are reported in
/// `batchItemFailures` so the transport redelivers only those records. An
/// envelope that is not valid JSON or lacks `Records` is a 400.
pub async fn process_batch(
    State(state): State<AppState>,
    payload: Result<Json<StreamEvent>, JsonRejection>,
) -> AppResult<Json<BatchResponse>> {
    let Json(event) = payload?;
    let records = event.into_records();

    let outcome = state.coordinator.process_batch(records).await;

    if outcome.status() == BatchStatus::PartialFailure {
        tracing::warn!(
            batch_id = %outcome.batch_id,
            failed = outcome.failed_record_ids().len(),
            processed = outcome.processed,
            "Batch completed with failures",
        );
    }

    Ok(Json(BatchResponse::from(outcome)))
}
