//! Reading store writer.

use std::sync::Arc;
use std::time::Duration;

use vitalwatch_core::store::ReadingStore;
use vitalwatch_core::Reading;

use crate::error::RecordError;

/// Persists classified readings, bounding each write by a timeout.
#[derive(Clone)]
pub struct ReadingWriter {
    store: Arc<dyn ReadingStore>,
    timeout: Duration,
}

impl ReadingWriter {
    pub fn new(store: Arc<dyn ReadingStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Upsert `reading`. No retry: a failure is reported to the caller.
    pub async fn write(&self, reading: &Reading) -> Result<(), RecordError> {
        let store = self.store.name();
        match tokio::time::timeout(self.timeout, self.store.put_reading(reading)).await {
            Ok(Ok(())) => {
                tracing::debug!(
                    store,
                    patient_id = %reading.patient_id(),
                    tier = %reading.tier(),
                    "Reading persisted"
                );
                Ok(())
            }
            Ok(Err(source)) => Err(RecordError::Persistence {
                store: store.to_string(),
                source,
            }),
            Err(_elapsed) => Err(RecordError::PersistenceTimeout {
                store: store.to_string(),
                timeout: self.timeout,
            }),
        }
    }
}
