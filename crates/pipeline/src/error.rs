use std::time::Duration;

use serde::Serialize;
use vitalwatch_core::notification::NotificationError;
use vitalwatch_core::record::DecodeError;
use vitalwatch_core::store::StoreError;

/// Coarse failure category reported to the stream transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureKind {
    MalformedRecord,
    PersistenceFailure,
    NotificationFailure,
}

/// Why one record (or one step of it) failed.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("malformed record: {0}")]
    Malformed(#[from] DecodeError),

    #[error("malformed record: no payload data")]
    MissingData,

    #[error("failed to write to '{store}': {source}")]
    Persistence {
        store: String,
        #[source]
        source: StoreError,
    },

    #[error("write to '{store}' timed out after {timeout:?}")]
    PersistenceTimeout { store: String, timeout: Duration },

    #[error("failed to notify '{destination}': {source}")]
    Notification {
        destination: String,
        #[source]
        source: NotificationError,
    },

    #[error("notification to '{destination}' timed out after {timeout:?}")]
    NotificationTimeout {
        destination: String,
        timeout: Duration,
    },
}

impl RecordError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RecordError::Malformed(_) | RecordError::MissingData => FailureKind::MalformedRecord,
            RecordError::Persistence { .. } | RecordError::PersistenceTimeout { .. } => {
                FailureKind::PersistenceFailure
            }
            RecordError::Notification { .. } | RecordError::NotificationTimeout { .. } => {
                FailureKind::NotificationFailure
            }
        }
    }
}
