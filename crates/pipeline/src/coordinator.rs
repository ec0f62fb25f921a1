//! Batch coordinator.
//!
//! Runs every record of a delivered batch through
//! decode → classify → persist reading → (if critical) dispatch alert.
//! Errors are caught per record and turned into [`RecordFailure`]s; they
//! never abort the remaining records. Nothing is retried here: redelivery
//! is the stream transport's decision, made from the [`BatchOutcome`].

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use uuid::Uuid;
use vitalwatch_core::clock::{Clock, SystemClock};
use vitalwatch_core::notification::NotificationChannel;
use vitalwatch_core::record::decode_record;
use vitalwatch_core::store::{AlertStore, ReadingStore};
use vitalwatch_core::{Alert, Reading, RiskTier};

use crate::config::PipelineConfig;
use crate::dispatcher::AlertDispatcher;
use crate::envelope::StreamRecord;
use crate::error::RecordError;
use crate::outcome::{BatchOutcome, BatchState, RecordFailure};
use crate::writer::ReadingWriter;

/// What happened to a single record.
#[derive(Debug)]
struct RecordReport {
    tier: Option<RiskTier>,
    alert_raised: bool,
    errors: Vec<RecordError>,
}

impl RecordReport {
    fn failed(error: RecordError) -> Self {
        Self {
            tier: None,
            alert_raised: false,
            errors: vec![error],
        }
    }
}

/// Processes stream batches against injected store and notification clients.
pub struct BatchCoordinator {
    writer: ReadingWriter,
    dispatcher: AlertDispatcher,
    clock: Arc<dyn Clock>,
    concurrency: usize,
}

impl BatchCoordinator {
    /// Build a coordinator from explicit client handles.
    pub fn new(
        readings: Arc<dyn ReadingStore>,
        alerts: Arc<dyn AlertStore>,
        channel: Arc<dyn NotificationChannel>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            writer: ReadingWriter::new(readings, config.store_timeout),
            dispatcher: AlertDispatcher::new(
                alerts,
                channel,
                config.store_timeout,
                config.notify_timeout,
            ),
            clock: Arc::new(SystemClock),
            concurrency: config.record_concurrency.max(1),
        }
    }

    /// Replace the processing-time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Process every record of one batch.
    ///
    /// Records run with up to `record_concurrency` in flight; failures are
    /// reported in input order regardless.
    pub async fn process_batch(&self, records: Vec<StreamRecord>) -> BatchOutcome {
        let batch_id = Uuid::now_v7();
        let mut state = BatchState::Pending;
        tracing::debug!(%batch_id, ?state, records = records.len(), "Batch received");

        state = state.next();
        tracing::info!(%batch_id, ?state, records = records.len(), "Processing batch");

        let reports: Vec<(String, RecordReport)> = stream::iter(records)
            .map(|record| async move {
                let report = self.process_record(&record).await;
                (record.id, report)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut outcome = BatchOutcome {
            batch_id,
            state,
            processed: reports.len(),
            succeeded: 0,
            alerts_raised: 0,
            failures: Vec::new(),
        };
        for (record_id, report) in &reports {
            if report.alert_raised {
                outcome.alerts_raised += 1;
            }
            if report.errors.is_empty() {
                outcome.succeeded += 1;
            }
            for error in &report.errors {
                tracing::warn!(
                    %batch_id,
                    record_id = %record_id,
                    tier = ?report.tier,
                    kind = ?error.kind(),
                    error = %error,
                    "Record failed"
                );
                outcome.failures.push(RecordFailure::new(record_id, error));
            }
        }

        outcome.state = outcome.state.next();
        tracing::info!(
            %batch_id,
            state = ?outcome.state,
            processed = outcome.processed,
            succeeded = outcome.succeeded,
            failed = outcome.failed_record_ids().len(),
            alerts_raised = outcome.alerts_raised,
            "Batch completed"
        );
        outcome
    }

    async fn process_record(&self, record: &StreamRecord) -> RecordReport {
        let vitals = match record
            .data
            .as_deref()
            .ok_or(RecordError::MissingData)
            .and_then(|data| decode_record(data.as_bytes()).map_err(RecordError::from))
        {
            Ok(vitals) => vitals,
            Err(e) => return RecordReport::failed(e),
        };

        let reading = Reading::classify(vitals, self.clock.now());
        let tier = reading.tier();
        tracing::debug!(
            record_id = %record.id,
            patient_id = %reading.patient_id(),
            %tier,
            "Reading classified"
        );

        if let Err(e) = self.writer.write(&reading).await {
            // No alert without its reading.
            return RecordReport {
                tier: Some(tier),
                ..RecordReport::failed(e)
            };
        }

        let Some(alert) = Alert::for_reading(&reading) else {
            return RecordReport {
                tier: Some(tier),
                alert_raised: false,
                errors: Vec::new(),
            };
        };

        let dispatch = self.dispatcher.dispatch(&alert).await;
        RecordReport {
            tier: Some(tier),
            alert_raised: true,
            errors: dispatch.errors,
        }
    }
}

impl std::fmt::Debug for BatchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchCoordinator")
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
