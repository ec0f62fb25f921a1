//! External delivery channels for critical-alert notifications.

pub mod email;
pub mod log;
pub mod webhook;
