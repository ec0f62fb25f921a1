//! VitalWatch notification delivery.
//!
//! Concrete [`NotificationChannel`](vitalwatch_core::notification::NotificationChannel)
//! implementations for critical alerts:
//!
//! - [`WebhookChannel`]: JSON POST to an HTTP endpoint.
//! - [`EmailChannel`]: plain-text e-mail over SMTP.
//! - [`LogChannel`]: writes the alert to the log only (development).
//!
//! [`NotificationTarget`] parses the configured destination and builds the
//! matching channel.

pub mod delivery;
pub mod target;

pub use delivery::email::{EmailChannel, EmailConfig};
pub use delivery::log::LogChannel;
pub use delivery::webhook::WebhookChannel;
pub use target::NotificationTarget;
