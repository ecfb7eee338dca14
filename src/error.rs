//! Error types for the cmsload decoding pipeline.
//!
//! This module defines the error hierarchy:
//!
//! - [`DecodeError`] - per-field and per-record decoding errors
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Decoding Errors
// =============================================================================

/// Errors while decoding one raw CMS record (or one field of it).
///
/// These never escape the decoding layer: collection decoders drop the
/// offending record and continue, and the aggregation step substitutes an
/// empty collection when a whole sequence fails to decode.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A required field is absent from the record.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A localized field has no value for the selected locale.
    #[error("missing locale key '{0}'")]
    MissingLocale(String),

    /// A value has the wrong JSON type.
    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    /// The record's declared content type does not match the decoder invoked.
    #[error("content type mismatch: expected '{expected}', found '{found}'")]
    ContentTypeMismatch {
        expected: &'static str,
        found: String,
    },

    /// A timestamp field could not be parsed.
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    /// A recurrence rule string could not be parsed.
    #[error("invalid recurrence rule: {0}")]
    InvalidRecurrence(String),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::pipeline::decode_file`].
/// Malformed individual records are never an error at this level; only a
/// payload that cannot be read or parsed at all is.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Failed to read the payload source.
    #[error("failed to read payload: {0}")]
    Io(#[from] std::io::Error),

    /// The payload is not valid JSON, or not a JSON object.
    #[error("payload is not a valid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload source contains no data at all.
    #[error("payload is empty")]
    EmptyPayload,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_format() {
        let err = DecodeError::MissingField("startTime".into());
        assert!(err.to_string().contains("startTime"));

        let err = DecodeError::ContentTypeMismatch {
            expected: "event",
            found: "sponsor".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("event"));
        assert!(msg.contains("sponsor"));
    }

    #[test]
    fn test_wrong_type_format() {
        let err = DecodeError::WrongType {
            expected: "number",
            found: "string",
        };
        assert_eq!(err.to_string(), "expected number, found string");
    }

    #[test]
    fn test_pipeline_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let pipeline_err: PipelineError = json_err.into();
        assert!(pipeline_err.to_string().contains("JSON"));
    }
}
