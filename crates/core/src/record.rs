//! Decoding of opaque stream records.
//!
//! A record payload is base64 text wrapping a UTF-8 JSON object:
//!
//! ```json
//! {"patient_id": "P1", "hr": 95, "spo2": 97, "bp_sys": 118}
//! ```
//!
//! Every required field must be present and typed correctly. A missing or
//! `null` vital is rejected rather than defaulted, so a sensor dropout is
//! never mistaken for a normal reading. Unknown fields are ignored.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};
use validator::Validate;

use crate::reading::VitalSigns;

pub const FIELD_PATIENT_ID: &str = "patient_id";
pub const FIELD_HEART_RATE: &str = "hr";
pub const FIELD_SPO2: &str = "spo2";
pub const FIELD_BP_SYSTOLIC: &str = "bp_sys";

/// Why a record could not be turned into [`VitalSigns`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("required field '{0}' is missing")]
    MissingField(&'static str),

    #[error("field '{field}' must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("payload failed validation: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Decode one base64 record payload into validated vitals.
pub fn decode_record(data: &[u8]) -> Result<VitalSigns, DecodeError> {
    let bytes = STANDARD.decode(data)?;
    let text = String::from_utf8(bytes)?;
    let value: Value = serde_json::from_str(&text)?;
    let object = value.as_object().ok_or(DecodeError::NotAnObject)?;

    let vitals = VitalSigns {
        patient_id: required_string(object, FIELD_PATIENT_ID)?,
        heart_rate: required_number(object, FIELD_HEART_RATE)?,
        spo2: required_number(object, FIELD_SPO2)?,
        bp_systolic: required_number(object, FIELD_BP_SYSTOLIC)?,
    };
    vitals.validate()?;
    Ok(vitals)
}

/// Encode a JSON payload the way the stream producer does. Inverse of the
/// transport step of [`decode_record`].
pub fn encode_record(payload: &Value) -> String {
    STANDARD.encode(payload.to_string())
}

fn required<'a>(object: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, DecodeError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(DecodeError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn required_string(object: &Map<String, Value>, field: &'static str) -> Result<String, DecodeError> {
    required(object, field)?
        .as_str()
        .map(str::to_string)
        .ok_or(DecodeError::WrongType {
            field,
            expected: "string",
        })
}

fn required_number(object: &Map<String, Value>, field: &'static str) -> Result<f64, DecodeError> {
    required(object, field)?
        .as_f64()
        .ok_or(DecodeError::WrongType {
            field,
            expected: "number",
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
