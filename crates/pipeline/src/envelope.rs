//! Wire envelope for batches delivered by the stream transport.
//!
//! ```json
//! {"Records": [{"eventID": "shardId-000:4955",
//!               "kinesis": {"data": "eyJwYXRpZW50X2lkIjoi...",
//!                           "sequenceNumber": "4955",
//!                           "partitionKey": "P1"}}]}
//! ```
//!
//! `partitionKey` and any other transport fields are ignored.
//!
//! Per-record fields are optional at this level so that one broken record
//! becomes a per-record failure instead of rejecting the whole batch.

use serde::Deserialize;

/// A batch as delivered by the transport.
#[derive(Debug, Deserialize)]
pub struct StreamEvent {
    #[serde(rename = "Records")]
    pub records: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "eventID")]
    pub event_id: Option<String>,
    pub kinesis: Option<KinesisPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinesisPayload {
    /// Base64 text of the JSON reading.
    pub data: Option<String>,
    pub sequence_number: Option<String>,
}

/// One record ready for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRecord {
    /// Identifier the transport uses for redelivery decisions.
    pub id: String,
    /// Base64 payload; `None` when the envelope carried no data.
    pub data: Option<String>,
}

impl StreamRecord {
    pub fn new(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: Some(data.into()),
        }
    }
}

impl StreamEvent {
    /// Flatten the envelope into pipeline records.
    ///
    /// The record id is the sequence number, else the event id, else the
    /// record's position in the batch as `#<index>`.
    pub fn into_records(self) -> Vec<StreamRecord> {
        self.records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let (data, sequence_number) = match record.kinesis {
                    Some(k) => (k.data, k.sequence_number),
                    None => (None, None),
                };
                let id = sequence_number
                    .or(record.event_id)
                    .unwrap_or_else(|| format!("#{index}"));
                StreamRecord { id, data }
            })
            .collect()
    }
}
