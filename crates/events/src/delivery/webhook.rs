//! Webhook notification delivery.
//!
//! [`WebhookChannel`] POSTs the JSON-encoded [`Notification`] to a fixed URL.
//! A single attempt is made per publish; redelivery is left to the stream
//! transport, which retries whole batches.

use std::time::Duration;

use async_trait::async_trait;
use vitalwatch_core::notification::{Notification, NotificationChannel, NotificationError};

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

impl From<WebhookError> for NotificationError {
    fn from(err: WebhookError) -> Self {
        let message = err.to_string();
        match err {
            WebhookError::Request(_) => NotificationError::Unavailable(message),
            WebhookError::HttpStatus(_) => NotificationError::Rejected(message),
        }
    }
}

// ---------------------------------------------------------------------------
// WebhookChannel
// ---------------------------------------------------------------------------

/// Delivers notifications to one webhook endpoint.
#[derive(Debug, Clone)]
pub struct WebhookChannel {
    client: reqwest::Client,
    url: String,
}

impl WebhookChannel {
    /// Create a channel posting to `url` with a pre-configured HTTP client.
    pub fn new(url: impl Into<String>) -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Execute a single POST request and check the response status.
    async fn try_send(&self, notification: &Notification) -> Result<(), WebhookError> {
        let response = self.client.post(&self.url).json(notification).send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationChannel for WebhookChannel {
    fn destination(&self) -> &str {
        &self.url
    }

    async fn publish(&self, notification: &Notification) -> Result<(), NotificationError> {
        match self.try_send(notification).await {
            Ok(()) => {
                tracing::info!(
                    url = %self.url,
                    patient_id = %notification.patient_id,
                    "Webhook notification delivered"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "Webhook delivery failed");
                Err(e.into())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use vitalwatch_core::risk::RiskTier;

    fn notification() -> Notification {
        Notification {
            subject: "CRITICAL HEALTH ALERT: Patient P2".to_string(),
            body: "body".to_string(),
            patient_id: "P2".to_string(),
            recorded_at: chrono::Utc::now(),
            heart_rate: 150.0,
            spo2: 80.0,
            bp_systolic: 190.0,
            tier: RiskTier::Critical,
        }
    }

    #[test]
    fn webhook_error_display_http_status() {
        let err = WebhookError::HttpStatus(502);
        assert_eq!(err.to_string(), "Webhook returned HTTP 502");
    }

    #[test]
    fn http_status_maps_to_rejected() {
        let err: NotificationError = WebhookError::HttpStatus(403).into();
        assert_matches!(err, NotificationError::Rejected(msg) if msg.contains("403"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_unavailable() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let channel = WebhookChannel::new(format!("http://{addr}/alerts")).unwrap();
        let result = channel.publish(&notification()).await;
        assert_matches!(result, Err(NotificationError::Unavailable(_)));
    }

    #[test]
    fn destination_is_the_url() {
        let channel = WebhookChannel::new("https://hooks.example.org/icu").unwrap();
        assert_eq!(channel.destination(), "https://hooks.example.org/icu");
    }
}
