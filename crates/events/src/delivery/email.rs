//! Email notification delivery via SMTP.
//!
//! [`EmailChannel`] wraps the `lettre` async SMTP transport to send the
//! alert subject and body as a plain-text e-mail. Configuration is loaded
//! from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no channel can be built.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use vitalwatch_core::notification::{Notification, NotificationChannel, NotificationError};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

impl From<EmailError> for NotificationError {
    fn from(err: EmailError) -> Self {
        let message = err.to_string();
        match err {
            EmailError::Transport(ref e) if e.is_permanent() => NotificationError::Rejected(message),
            EmailError::Transport(_) => NotificationError::Unavailable(message),
            EmailError::Address(_) | EmailError::Build(_) => NotificationError::Rejected(message),
        }
    }
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "alerts@vitalwatch.local";

/// Configuration for the SMTP email delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set.
    ///
    /// | Variable        | Required | Default                    |
    /// |-----------------|----------|----------------------------|
    /// | `SMTP_HOST`     | yes      | -                          |
    /// | `SMTP_PORT`     | no       | `587`                      |
    /// | `SMTP_FROM`     | no       | `alerts@vitalwatch.local`  |
    /// | `SMTP_USER`     | no       | -                          |
    /// | `SMTP_PASSWORD` | no       | -                          |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// EmailChannel
// ---------------------------------------------------------------------------

/// Sends alert notifications to one recipient via SMTP.
///
/// The transport is built once and shared by concurrently processed records.
pub struct EmailChannel {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
    recipient: String,
}

impl EmailChannel {
    /// Create a channel delivering to `recipient` through the configured relay.
    pub fn new(config: &EmailConfig, recipient: &str) -> Result<Self, EmailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from: config.from_address.parse()?,
            to: recipient.parse()?,
            recipient: recipient.to_string(),
        })
    }

    fn build_message(&self, notification: &Notification) -> Result<Message, EmailError> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(notification.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())
            .map_err(|e| EmailError::Build(e.to_string()))
    }

    async fn try_send(&self, notification: &Notification) -> Result<(), EmailError> {
        let email = self.build_message(notification)?;
        self.transport.send(email).await?;
        Ok(())
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn destination(&self) -> &str {
        &self.recipient
    }

    async fn publish(&self, notification: &Notification) -> Result<(), NotificationError> {
        match self.try_send(notification).await {
            Ok(()) => {
                tracing::info!(
                    to = %self.recipient,
                    patient_id = %notification.patient_id,
                    "Notification email sent"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(to = %self.recipient, error = %e, "Notification email failed");
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

    fn config() -> EmailConfig {
        EmailConfig {
            smtp_host: "smtp.example.org".to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            smtp_user: None,
            smtp_password: None,
        }
    }

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn bad_recipient_is_rejected_at_construction() {
        assert!(matches!(
            EmailChannel::new(&config(), "not-an-email"),
            Err(EmailError::Address(_))
        ));
    }

    #[test]
    fn message_uses_alert_subject_and_body() {
        let channel = EmailChannel::new(&config(), "oncall@hospital.example").unwrap();
        let notification = Notification {
            subject: "CRITICAL HEALTH ALERT: Patient P2".to_string(),
            body: "Vitals: HR=150, SpO2=80, BP=190".to_string(),
            patient_id: "P2".to_string(),
            recorded_at: chrono::Utc::now(),
            heart_rate: 150.0,
            spo2: 80.0,
            bp_systolic: 190.0,
            tier: RiskTier::Critical,
        };
        let message = channel.build_message(&notification).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: CRITICAL HEALTH ALERT: Patient P2"));
        assert!(raw.contains("Vitals: HR=150, SpO2=80, BP=190"));
        assert_eq!(channel.destination(), "oncall@hospital.example");
    }

    #[test]
    fn address_errors_map_to_rejected() {
        let addr_err = "nope".parse::<lettre::Address>().unwrap_err();
        let err: NotificationError = EmailError::Address(addr_err).into();
        assert_matches!(err, NotificationError::Rejected(_));
    }
}
