//! VitalWatch domain core.
//!
//! Pure domain logic and the collaborator traits the pipeline talks to:
//!
//! - [`record`]: decodes one opaque stream record into [`VitalSigns`].
//! - [`risk`]: fixed-threshold risk classification.
//! - [`reading`]: the classified, immutable [`Reading`].
//! - [`alert`]: critical-tier [`Alert`] and its notification text.
//! - [`store`] / [`notification`]: traits for the reading/alert stores and
//!   the notification channel, plus in-memory implementations.

pub mod alert;
pub mod clock;
pub mod error;
pub mod notification;
pub mod reading;
pub mod record;
pub mod risk;
pub mod store;
pub mod types;

pub use alert::Alert;
pub use reading::{Reading, VitalSigns};
pub use risk::{classify, RiskTier};
