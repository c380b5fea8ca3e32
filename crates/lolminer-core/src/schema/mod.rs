//! Upstream schema and decoder.
//!
//! Decoding is permissive about *content* (unknown fields are ignored, absent
//! fields take zero values) but strict about *shape*: the payload must be
//! syntactically valid JSON with an object at the top level, and present
//! fields must carry the expected JSON type. No semantic checks are made.

mod document;

pub use document::{AlgorithmRecord, MetricDocument, SessionInfo, WorkerRecord};

use serde_json::Value;

use crate::error::{ExporterError, Result};

/// Decode a raw upstream body into a [`MetricDocument`].
pub fn decode_document(raw: &[u8]) -> Result<MetricDocument> {
    let value: Value =
        serde_json::from_slice(raw).map_err(|e| ExporterError::Decode(e.to_string()))?;

    if !value.is_object() {
        return Err(ExporterError::Decode(format!(
            "expected a JSON object at top level, found {}",
            json_kind(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| ExporterError::Decode(e.to_string()))
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
