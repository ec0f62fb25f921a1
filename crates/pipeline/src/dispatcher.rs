//! Alert dispatch for critical readings.
//!
//! Dispatching has two independent sub-steps: record the alert in the alert
//! store, and publish a notification. Both are always attempted, and they
//! run concurrently. There is no transactional coupling: an alert can be
//! recorded without its notification being delivered and vice versa; every
//! failed sub-step is reported.

use std::sync::Arc;
use std::time::Duration;

use vitalwatch_core::notification::{Notification, NotificationChannel};
use vitalwatch_core::store::AlertStore;
use vitalwatch_core::Alert;

use crate::error::RecordError;

/// Result of dispatching one alert.
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub persisted: bool,
    pub notified: bool,
    pub errors: Vec<RecordError>,
}

impl DispatchReport {
    pub fn is_complete(&self) -> bool {
        self.persisted && self.notified
    }
}

#[derive(Clone)]
pub struct AlertDispatcher {
    alerts: Arc<dyn AlertStore>,
    channel: Arc<dyn NotificationChannel>,
    store_timeout: Duration,
    notify_timeout: Duration,
}

impl AlertDispatcher {
    pub fn new(
        alerts: Arc<dyn AlertStore>,
        channel: Arc<dyn NotificationChannel>,
        store_timeout: Duration,
        notify_timeout: Duration,
    ) -> Self {
        Self {
            alerts,
            channel,
            store_timeout,
            notify_timeout,
        }
    }

    /// Record `alert` and publish its notification.
    pub async fn dispatch(&self, alert: &Alert) -> DispatchReport {
        let notification = Notification::from(alert);
        let (persisted, notified) =
            tokio::join!(self.persist(alert), self.publish(&notification));

        let mut report = DispatchReport::default();
        match persisted {
            Ok(()) => report.persisted = true,
            Err(e) => report.errors.push(e),
        }
        match notified {
            Ok(()) => report.notified = true,
            Err(e) => report.errors.push(e),
        }

        if report.is_complete() {
            tracing::info!(
                patient_id = %alert.patient_id,
                destination = %self.channel.destination(),
                "Critical alert recorded and published"
            );
        } else {
            tracing::warn!(
                patient_id = %alert.patient_id,
                persisted = report.persisted,
                notified = report.notified,
                "Critical alert dispatch incomplete"
            );
        }
        report
    }

    async fn persist(&self, alert: &Alert) -> Result<(), RecordError> {
        let store = self.alerts.name();
        match tokio::time::timeout(self.store_timeout, self.alerts.put_alert(alert)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(RecordError::Persistence {
                store: store.to_string(),
                source,
            }),
            Err(_elapsed) => Err(RecordError::PersistenceTimeout {
                store: store.to_string(),
                timeout: self.store_timeout,
            }),
        }
    }

    async fn publish(&self, notification: &Notification) -> Result<(), RecordError> {
        let destination = self.channel.destination();
        match tokio::time::timeout(self.notify_timeout, self.channel.publish(notification)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(RecordError::Notification {
                destination: destination.to_string(),
                source,
            }),
            Err(_elapsed) => Err(RecordError::NotificationTimeout {
                destination: destination.to_string(),
                timeout: self.notify_timeout,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
