//! Shared response envelope types for API handlers.

use serde::Serialize;
use vitalwatch_pipeline::outcome::BatchItemFailures;
use vitalwatch_pipeline::BatchOutcome;

/// Batch response: the outcome under `data`, plus the top-level
/// `batchItemFailures` list the stream transport reads for redelivery.
///
/// ```json
/// {"data": {...}, "batchItemFailures": [{"itemIdentifier": "2"}]}
/// ```
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub data: BatchOutcome,
    #[serde(flatten)]
    pub failures: BatchItemFailures,
}

impl From<BatchOutcome> for BatchResponse {
    fn from(outcome: BatchOutcome) -> Self {
        let failures = outcome.batch_item_failures();
        Self {
            data: outcome,
            failures,
        }
    }
}
