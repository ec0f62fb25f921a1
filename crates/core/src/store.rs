//! Write-only stores for readings and alerts.
//!
//! Both stores are keyed by `(patient_id, recorded_at)` and support a single
//! write-or-overwrite operation. Implementations must be safe to share
//! across concurrently processed records.

use async_trait::async_trait;

use crate::alert::Alert;
use crate::reading::Reading;

/// Failure reported by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or did not answer.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend answered but refused the write.
    #[error("write rejected: {0}")]
    Rejected(String),
}

/// Persists classified readings.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Human-readable name of the store (table, namespace, ...), for logs.
    fn name(&self) -> &str;

    /// Upsert `reading` under `(patient_id, recorded_at)`.
    async fn put_reading(&self, reading: &Reading) -> Result<(), StoreError>;
}

/// Persists alert history.
#[async_trait]
pub trait AlertStore: Send + Sync {
    fn name(&self) -> &str;

    /// Upsert `alert` under `(patient_id, recorded_at)`.
    async fn put_alert(&self, alert: &Alert) -> Result<(), StoreError>;
}

pub mod memory {
    //! In-process stores for local development and tests.

    use std::collections::BTreeMap;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::{AlertStore, ReadingStore, StoreError};
    use crate::alert::Alert;
    use crate::reading::Reading;
    use crate::types::Timestamp;

    type Key = (String, Timestamp);

    /// Reading store backed by an ordered map.
    #[derive(Debug, Default)]
    pub struct MemoryReadingStore {
        name: String,
        rows: Mutex<BTreeMap<Key, Reading>>,
    }

    impl MemoryReadingStore {
        pub fn new(name: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                rows: Mutex::default(),
            }
        }

        /// Snapshot of every stored reading, ordered by key.
        pub async fn readings(&self) -> Vec<Reading> {
            self.rows.lock().await.values().cloned().collect()
        }

        pub async fn len(&self) -> usize {
            self.rows.lock().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.rows.lock().await.is_empty()
        }
    }

    #[async_trait]
    impl ReadingStore for MemoryReadingStore {
        fn name(&self) -> &str {
            &self.name
        }

        async fn put_reading(&self, reading: &Reading) -> Result<(), StoreError> {
            let key = (reading.patient_id().to_string(), reading.recorded_at());
            self.rows.lock().await.insert(key, reading.clone());
            Ok(())
        }
    }

    /// Alert store backed by an ordered map.
    #[derive(Debug, Default)]
    pub struct MemoryAlertStore {
        name: String,
        rows: Mutex<BTreeMap<Key, Alert>>,
    }

    impl MemoryAlertStore {
        pub fn new(name: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                rows: Mutex::default(),
            }
        }

        pub async fn alerts(&self) -> Vec<Alert> {
            self.rows.lock().await.values().cloned().collect()
        }

        pub async fn len(&self) -> usize {
            self.rows.lock().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.rows.lock().await.is_empty()
        }
    }

    #[async_trait]
    impl AlertStore for MemoryAlertStore {
        fn name(&self) -> &str {
            &self.name
        }

        async fn put_alert(&self, alert: &Alert) -> Result<(), StoreError> {
            let key = (alert.patient_id.clone(), alert.recorded_at);
            self.rows.lock().await.insert(key, alert.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::{MemoryAlertStore, MemoryReadingStore};
    use super::*;
    use crate::reading::VitalSigns;
    use chrono::Utc;

    fn reading(patient: &str, hr: f64) -> Reading {
        Reading::classify(
            VitalSigns {
                patient_id: patient.to_string(),
                heart_rate: hr,
                spo2: 80.0,
                bp_systolic: 120.0,
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn same_key_overwrites() {
        let store = MemoryReadingStore::new("readings");
        let r = reading("P1", 95.0);
        store.put_reading(&r).await.unwrap();
        store.put_reading(&r).await.unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(store.readings().await[0], r);
    }

    #[tokio::test]
    async fn alert_store_keeps_alerts_by_key() {
        let store = MemoryAlertStore::new("alerts");
        assert!(store.is_empty().await);
        let alert = Alert::for_reading(&reading("P2", 150.0)).unwrap();
        store.put_alert(&alert).await.unwrap();
        assert_eq!(store.alerts().await, vec![alert]);
        assert_eq!(store.name(), "alerts");
    }
}
