//! Parsing of the configured notification destination.
//!
//! | Destination                  | Channel          |
//! |------------------------------|------------------|
//! | `http://…`, `https://…`      | [`WebhookChannel`] |
//! | `mailto:addr`, `addr@host`   | [`EmailChannel`]   |
//! | `log:`                       | [`LogChannel`]     |

use std::sync::Arc;

use vitalwatch_core::error::CoreError;
use vitalwatch_core::notification::NotificationChannel;

use crate::delivery::email::{EmailChannel, EmailConfig};
use crate::delivery::log::LogChannel;
use crate::delivery::webhook::WebhookChannel;

/// Where critical alerts are published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationTarget {
    Webhook(String),
    Email(String),
    Log,
}

impl NotificationTarget {
    pub fn parse(destination: &str) -> Result<Self, CoreError> {
        let destination = destination.trim();
        if destination.starts_with("http://") || destination.starts_with("https://") {
            return Ok(Self::Webhook(destination.to_string()));
        }
        if destination == "log:" || destination == "log" {
            return Ok(Self::Log);
        }
        let address = destination.strip_prefix("mailto:").unwrap_or(destination);
        if address.contains('@') && !address.contains(char::is_whitespace) {
            return Ok(Self::Email(address.to_string()));
        }
        Err(CoreError::Config(format!(
            "unsupported notification destination '{destination}'"
        )))
    }

    /// Build the channel for this target.
    ///
    /// E-mail targets need an SMTP configuration.
    pub fn build_channel(
        &self,
        email: Option<&EmailConfig>,
    ) -> Result<Arc<dyn NotificationChannel>, CoreError> {
        match self {
            Self::Webhook(url) => {
                let channel = WebhookChannel::new(url.as_str())
                    .map_err(|e| CoreError::Config(format!("webhook client: {e}")))?;
                Ok(Arc::new(channel))
            }
            Self::Email(address) => {
                let config = email.ok_or_else(|| {
                    CoreError::Config(format!(
                        "SMTP_HOST must be set to deliver notifications to {address}"
                    ))
                })?;
                let channel = EmailChannel::new(config, address)
                    .map_err(|e| CoreError::Config(format!("email channel: {e}")))?;
                Ok(Arc::new(channel))
            }
            Self::Log => Ok(Arc::new(LogChannel)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_webhook_urls() {
        assert_eq!(
            NotificationTarget::parse("https://hooks.example.org/icu").unwrap(),
            NotificationTarget::Webhook("https://hooks.example.org/icu".to_string())
        );
    }

    #[test]
    fn parses_email_with_and_without_scheme() {
        let expected = NotificationTarget::Email("oncall@hospital.example".to_string());
        assert_eq!(NotificationTarget::parse("mailto:oncall@hospital.example").unwrap(), expected);
        assert_eq!(NotificationTarget::parse(" oncall@hospital.example ").unwrap(), expected);
    }

    #[test]
    fn parses_log_target() {
        assert_eq!(NotificationTarget::parse("log:").unwrap(), NotificationTarget::Log);
    }

    #[test]
    fn rejects_unknown_destinations() {
        for dest in ["", "arn:aws:sns:us-east-1:1:alerts", "ftp://x", "two words@x"] {
            assert_matches!(NotificationTarget::parse(dest), Err(CoreError::Config(_)), "{dest}");
        }
    }

    #[test]
    fn email_target_requires_smtp_config() {
        let target = NotificationTarget::Email("oncall@hospital.example".to_string());
        assert!(matches!(target.build_channel(None), Err(CoreError::Config(_))));
    }

    #[test]
    fn builds_webhook_and_log_channels() {
        let webhook = NotificationTarget::Webhook("http://localhost:9000/hook".to_string())
            .build_channel(None)
            .unwrap();
        assert_eq!(webhook.destination(), "http://localhost:9000/hook");
        let log = NotificationTarget::Log.build_channel(None).unwrap();
        assert_eq!(log.destination(), "log");
    }
}
