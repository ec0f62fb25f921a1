//! VitalWatch HTTP ingress.
//!
//! Accepts stream batches over HTTP, hands them to the
//! [`BatchCoordinator`](vitalwatch_pipeline::BatchCoordinator) and answers
//! with the partial-batch response the stream transport expects. Exposed as
//! a library so the binary and the integration tests share one router.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
