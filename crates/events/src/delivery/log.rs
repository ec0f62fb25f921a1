//! Log-only notification channel for local development.

use async_trait::async_trait;
use vitalwatch_core::notification::{Notification, NotificationChannel, NotificationError};

/// Writes each notification to the log at WARN level and reports success.
#[derive(Debug, Default, Clone)]
pub struct LogChannel;

#[async_trait]
impl NotificationChannel for LogChannel {
    fn destination(&self) -> &str {
        "log"
    }

    async fn publish(&self, notification: &Notification) -> Result<(), NotificationError> {
        tracing::warn!(
            patient_id = %notification.patient_id,
            tier = %notification.tier,
            subject = %notification.subject,
            body = %notification.body,
            "Critical alert (log channel)"
        );
        Ok(())
    }
}
