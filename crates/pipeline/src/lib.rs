//! Per-record processing pipeline for vital-sign stream batches.
//!
//! For each record in a delivered batch the [`BatchCoordinator`] runs
//! decode → classify → persist reading → (if critical) dispatch alert,
//! isolating failures so one bad record never blocks its siblings. The
//! resulting [`BatchOutcome`] tells the stream transport which records to
//! redeliver.

pub mod config;
pub mod coordinator;
pub mod dispatcher;
pub mod envelope;
pub mod error;
pub mod outcome;
pub mod writer;

pub use config::PipelineConfig;
pub use coordinator::BatchCoordinator;
pub use envelope::{StreamEvent, StreamRecord};
pub use error::{FailureKind, RecordError};
pub use outcome::{BatchOutcome, BatchState, BatchStatus};
