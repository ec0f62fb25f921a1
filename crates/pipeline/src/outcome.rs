//! Batch-level results returned to the stream transport.

use serde::Serialize;
use uuid::Uuid;

use crate::error::{FailureKind, RecordError};

/// Lifecycle of one batch: `Pending → Processing → Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchState {
    Pending,
    Processing,
    Completed,
}

impl BatchState {
    /// The state that follows `self`; `Completed` is terminal.
    pub fn next(self) -> Self {
        match self {
            BatchState::Pending => BatchState::Processing,
            BatchState::Processing | BatchState::Completed => BatchState::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Success,
    PartialFailure,
}

/// One failed step of one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordFailure {
    pub record_id: String,
    pub kind: FailureKind,
    pub detail: String,
}

impl RecordFailure {
    pub fn new(record_id: &str, error: &RecordError) -> Self {
        Self {
            record_id: record_id.to_string(),
            kind: error.kind(),
            detail: error.to_string(),
        }
    }
}

/// Summary of a processed batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub batch_id: Uuid,
    pub state: BatchState,
    /// Records attempted.
    pub processed: usize,
    /// Records that went through every applicable step without error.
    pub succeeded: usize,
    /// Critical readings for which alert dispatch was attempted.
    pub alerts_raised: usize,
    /// Failures in record order. A record whose alert persistence and
    /// notification both failed appears once per failed step.
    pub failures: Vec<RecordFailure>,
}

impl BatchOutcome {
    pub fn status(&self) -> BatchStatus {
        if self.failures.is_empty() {
            BatchStatus::Success
        } else {
            BatchStatus::PartialFailure
        }
    }

    /// Distinct failed record ids, in first-failure order.
    pub fn failed_record_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for failure in &self.failures {
            if !ids.contains(&failure.record_id.as_str()) {
                ids.push(&failure.record_id);
            }
        }
        ids
    }

    /// Partial-batch response understood by the stream transport.
    pub fn batch_item_failures(&self) -> BatchItemFailures {
        BatchItemFailures {
            batch_item_failures: self
                .failed_record_ids()
                .into_iter()
                .map(|id| ItemIdentifier {
                    item_identifier: id.to_string(),
                })
                .collect(),
        }
    }
}

/// `{"batchItemFailures": [{"itemIdentifier": "..."}]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemFailures {
    pub batch_item_failures: Vec<ItemIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemIdentifier {
    pub item_identifier: String,
}
