//! Timestamp source for readings.
//!
//! Readings are stamped with processing time, not sensor time. The clock is
//! injected so tests can pin it.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::types::Timestamp;

/// Supplies the processing timestamp assigned to each reading.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Deterministic clock that starts at a fixed instant and advances by one
/// microsecond on every call, so consecutive readings never share a key.
#[derive(Debug)]
pub struct SteppingClock {
    next_micros: AtomicI64,
}

impl SteppingClock {
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            next_micros: AtomicI64::new(start.timestamp_micros()),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Timestamp {
        let micros = self.next_micros.fetch_add(1, Ordering::SeqCst);
        chrono::DateTime::<Utc>::from_timestamp_micros(micros).unwrap_or_default()
    }
}
