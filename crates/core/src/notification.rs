//! Outbound notifications for critical alerts.

use async_trait::async_trait;
use serde::Serialize;

use crate::alert::Alert;
use crate::risk::RiskTier;
use crate::types::Timestamp;

/// Message published to the notification destination.
///
/// Carries the `(subject, body)` pair every channel understands plus the
/// structured fields channels with richer payloads (e.g. webhooks) forward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
    pub patient_id: String,
    pub recorded_at: Timestamp,
    pub heart_rate: f64,
    pub spo2: f64,
    pub bp_systolic: f64,
    pub tier: RiskTier,
}

impl From<&Alert> for Notification {
    fn from(alert: &Alert) -> Self {
        Self {
            subject: alert.subject(),
            body: alert.message.clone(),
            patient_id: alert.patient_id.clone(),
            recorded_at: alert.recorded_at,
            heart_rate: alert.heart_rate,
            spo2: alert.spo2,
            bp_systolic: alert.bp_systolic,
            tier: alert.tier,
        }
    }
}

/// Failure reported by a notification channel.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// The channel could not be reached.
    #[error("notification channel unavailable: {0}")]
    Unavailable(String),

    /// The channel answered but refused the message.
    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// A pre-configured destination that accepts notifications.
///
/// Publishing is fire-and-forget from the pipeline's point of view, but the
/// outcome of each attempt is returned synchronously.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Destination description for logs (URL, address, ...).
    fn destination(&self) -> &str;

    async fn publish(&self, notification: &Notification) -> Result<(), NotificationError>;
}

pub mod memory {
    //! In-process channel that keeps every published notification.

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::{Notification, NotificationChannel, NotificationError};

    #[derive(Debug, Default)]
    pub struct RecordingChannel {
        destination: String,
        sent: Mutex<Vec<Notification>>,
    }

    impl RecordingChannel {
        pub fn new(destination: impl Into<String>) -> Self {
            Self {
                destination: destination.into(),
                sent: Mutex::default(),
            }
        }

        /// Every notification published so far, in publish order.
        pub async fn sent(&self) -> Vec<Notification> {
            self.sent.lock().await.clone()
        }
    }

    #[async_trait]
    impl NotificationChannel for RecordingChannel {
        fn destination(&self) -> &str {
            &self.destination
        }

        async fn publish(&self, notification: &Notification) -> Result<(), NotificationError> {
            self.sent.lock().await.push(notification.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::{Reading, VitalSigns};
    use chrono::Utc;

    #[test]
    fn notification_carries_alert_fields() {
        let reading = Reading::classify(
            VitalSigns {
                patient_id: "P2".to_string(),
                heart_rate: 150.0,
                spo2: 80.0,
                bp_systolic: 190.0,
            },
            Utc::now(),
        );
        let alert = Alert::for_reading(&reading).unwrap();
        let notification = Notification::from(&alert);

        assert_eq!(notification.subject, "CRITICAL HEALTH ALERT: Patient P2");
        assert_eq!(notification.body, alert.message);
        assert_eq!(notification.recorded_at, reading.recorded_at());
        assert_eq!(notification.heart_rate, 150.0);
        assert_eq!(notification.spo2, 80.0);
        assert_eq!(notification.bp_systolic, 190.0);
        assert_eq!(notification.tier, RiskTier::Critical);
    }
}
