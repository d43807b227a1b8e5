//! RPC response envelope and result payload decoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Response returned by a remote script execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptResponse {
    /// JSON-encoded result payload; present only for operations that
    /// produce a value.
    pub result: Option<String>,
    /// Diagnostic log emitted by the remote engine while executing.
    #[serde(default)]
    pub log: String,
}

impl ScriptResponse {
    /// Response carrying a result payload.
    #[must_use]
    pub fn with_result(result: impl Into<String>, log: impl Into<String>) -> Self {
        Self {
            result: Some(result.into()),
            log: log.into(),
        }
    }

    /// Response for an operation that produces no value.
    #[must_use]
    pub fn empty(log: impl Into<String>) -> Self {
        Self {
            result: None,
            log: log.into(),
        }
    }
}

/// Decode error.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not valid JSON. A well-behaved remote engine never
    /// produces this (a missing key serializes as `null`), but e.g. a bare
    /// `undefined` must surface rather than be coerced to a default.
    #[error("result payload {payload:?} is not valid JSON: {source}")]
    InvalidJson {
        payload: String,
        #[source]
        source: serde_json::Error,
    },
    /// The operation should have produced a result payload but none came
    /// back.
    #[error("remote engine returned no result payload")]
    MissingResult,
}

/// Decode a result payload into a JSON value.
///
/// A `null` payload (key absent in remote storage) decodes to
/// [`Value::Null`], distinguishable from the empty string and from zero.
///
/// # Errors
/// Returns [`DecodeError::InvalidJson`] for malformed payloads.
pub fn decode_result(payload: &str) -> Result<Value, DecodeError> {
    serde_json::from_str(payload).map_err(|source| DecodeError::InvalidJson {
        payload: payload.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_distinguishes_json_types() {
        assert_eq!(decode_result("\"abc\"").unwrap(), Value::from("abc"));
        assert_eq!(decode_result("\"\"").unwrap(), Value::from(""));
        assert_eq!(decode_result("0").unwrap(), Value::from(0));
        assert_eq!(decode_result("true").unwrap(), Value::Bool(true));
        assert_eq!(decode_result("null").unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_rejects_undefined() {
        let err = decode_result("undefined").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidJson { .. }));
        assert!(err.to_string().contains("undefined"));
    }

    #[test]
    fn test_envelope_deserializes_without_result() {
        let resp: ScriptResponse =
            serde_json::from_str("{\"log\":\"executed clear\"}").unwrap();
        assert!(resp.result.is_none());
        assert_eq!(resp.log, "executed clear");
    }
}
