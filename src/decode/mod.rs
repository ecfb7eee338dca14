//! Decoder primitives over untyped CMS records.
//!
//! A decoder is a pure function from a raw [`serde_json::Value`] to a
//! [`DecodeResult`]. This module provides the building blocks the per-entity
//! decoders are assembled from: typed value extractors, record-envelope
//! accessors, locale resolution, and the [`filter_map`] combinator that
//! isolates per-record failures.
//!
//! Failure is always communicated through the `Err` variant; nothing here
//! logs, panics, or performs I/O. One malformed record must never abort the
//! decoding of an entire batch, which is why sequences decode through
//! [`filter_map`] rather than an all-or-nothing collect.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{DecodeError, DecodeResult};
use crate::locale::Locale;
use crate::model::AssetRef;

pub mod event;
pub mod featured_events;
pub mod header_banner;
pub mod image;
pub mod performance;
pub mod sponsor;

pub use event::decode_event;
pub use featured_events::decode_featured_events;
pub use header_banner::decode_header_banner;
pub use image::decode_image_details;
pub use performance::decode_performance;
pub use sponsor::decode_sponsor;

// =============================================================================
// Combinators
// =============================================================================

/// Decode every element of a raw sequence, dropping elements that fail.
///
/// The input must be a JSON array; anything else is the only failure this
/// combinator can produce. Per-element decode failures are silently dropped,
/// so the result length is at most the input length and an empty result is a
/// valid success.
pub fn filter_map<T, F>(raw: &Value, decoder: F) -> DecodeResult<Vec<T>>
where
    F: Fn(&Value) -> DecodeResult<T>,
{
    let items = array(raw)?;
    Ok(items.iter().filter_map(|item| decoder(item).ok()).collect())
}

// =============================================================================
// Typed extractors
// =============================================================================

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Require a JSON object.
pub fn object(raw: &Value) -> DecodeResult<&Map<String, Value>> {
    raw.as_object().ok_or(DecodeError::WrongType {
        expected: "object",
        found: json_type(raw),
    })
}

/// Require a JSON array.
pub fn array(raw: &Value) -> DecodeResult<&Vec<Value>> {
    raw.as_array().ok_or(DecodeError::WrongType {
        expected: "array",
        found: json_type(raw),
    })
}

/// Require a field to be present on an object.
pub fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> DecodeResult<&'a Value> {
    obj.get(name)
        .ok_or_else(|| DecodeError::MissingField(name.to_string()))
}

/// Require a JSON string.
pub fn string(raw: &Value) -> DecodeResult<String> {
    raw.as_str()
        .map(str::to_owned)
        .ok_or(DecodeError::WrongType {
            expected: "string",
            found: json_type(raw),
        })
}

/// Require a JSON number.
pub fn number(raw: &Value) -> DecodeResult<f64> {
    raw.as_f64().ok_or(DecodeError::WrongType {
        expected: "number",
        found: json_type(raw),
    })
}

/// Require a non-negative integer that fits in `u32`.
pub fn uint(raw: &Value) -> DecodeResult<u32> {
    raw.as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(DecodeError::WrongType {
            expected: "unsigned integer",
            found: json_type(raw),
        })
}

/// Require an array of strings.
pub fn string_list(raw: &Value) -> DecodeResult<Vec<String>> {
    array(raw)?.iter().map(string).collect()
}

/// Require an RFC 3339 timestamp.
///
/// The CMS also emits minute-precision offsets ("2024-06-09T11:00+01:00"),
/// which strict RFC 3339 parsing rejects, so that form is accepted too.
pub fn timestamp(raw: &Value) -> DecodeResult<DateTime<Utc>> {
    let text = string(raw)?;
    DateTime::parse_from_rfc3339(&text)
        .or_else(|_| DateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M%:z"))
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| DecodeError::InvalidTimestamp(text))
}

// =============================================================================
// Locale resolution
// =============================================================================

/// Resolve a localized field to the selected locale's value.
///
/// A localized field is an object keyed by locale; a missing key for the
/// selected locale is a decode failure.
pub fn localized<'a>(raw: &'a Value, locale: &Locale) -> DecodeResult<&'a Value> {
    object(raw)?
        .get(locale.as_str())
        .ok_or_else(|| DecodeError::MissingLocale(locale.as_str().to_string()))
}

// =============================================================================
// Record envelope accessors
// =============================================================================

/// The record's id, from `sys.id`. Works for entries, assets, and links.
pub fn entry_id(raw: &Value) -> DecodeResult<String> {
    let sys = object(field(object(raw)?, "sys")?)?;
    string(field(sys, "id")?)
}

/// The entry's declared content type, from `sys.contentType.sys.id`.
pub fn content_type(raw: &Value) -> DecodeResult<String> {
    let sys = object(field(object(raw)?, "sys")?)?;
    let content_type = object(field(sys, "contentType")?)?;
    let type_sys = object(field(content_type, "sys")?)?;
    string(field(type_sys, "id")?)
}

/// Fail unless the entry declares the expected content type.
pub fn expect_content_type(raw: &Value, expected: &'static str) -> DecodeResult<()> {
    let found = content_type(raw)?;
    if found == expected {
        Ok(())
    } else {
        Err(DecodeError::ContentTypeMismatch { expected, found })
    }
}

/// Fail unless the record declares itself an asset (`sys.type == "Asset"`).
pub fn expect_asset(raw: &Value) -> DecodeResult<()> {
    let sys = object(field(object(raw)?, "sys")?)?;
    let found = string(field(sys, "type")?)?;
    if found == "Asset" {
        Ok(())
    } else {
        Err(DecodeError::ContentTypeMismatch {
            expected: "Asset",
            found,
        })
    }
}

/// The entry's `fields` mapping.
pub fn entry_fields(raw: &Value) -> DecodeResult<&Map<String, Value>> {
    object(field(object(raw)?, "fields")?)
}

/// Decode an asset link (`{ "sys": { "id": "..." } }`) into an [`AssetRef`].
pub fn asset_link(raw: &Value) -> DecodeResult<AssetRef> {
    entry_id(raw).map(AssetRef)
}

// =============================================================================
// Optional localized fields
// =============================================================================

/// Resolve an optional localized string field.
///
/// Optional fields pass through as present/absent and never fail the record:
/// a missing field, a missing locale key, or an ill-typed value all decode
/// to `None`.
pub fn optional_string(
    fields: &Map<String, Value>,
    name: &str,
    locale: &Locale,
) -> Option<String> {
    let raw = fields.get(name)?;
    let value = localized(raw, locale).ok()?;
    string(value).ok()
}

/// Resolve an optional localized asset link field. Same absorption rules as
/// [`optional_string`].
pub fn optional_asset_link(
    fields: &Map<String, Value>,
    name: &str,
    locale: &Locale,
) -> Option<AssetRef> {
    let raw = fields.get(name)?;
    let value = localized(raw, locale).ok()?;
    asset_link(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_map_drops_failures() {
        let raw = json!(["one", 2, "three", null]);
        let decoded = filter_map(&raw, string).unwrap();
        assert_eq!(decoded, vec!["one".to_string(), "three".to_string()]);
    }

    #[test]
    fn test_filter_map_length_bounded_by_input() {
        let raw = json!([1, 2, 3]);
        let decoded = filter_map(&raw, string).unwrap();
        assert!(decoded.len() <= 3);
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_filter_map_rejects_non_array() {
        let raw = json!({"entries": []});
        assert!(filter_map(&raw, string).is_err());
    }

    #[test]
    fn test_localized_selects_locale_key() {
        let raw = json!({"en-GB": "Parade", "de-DE": "Parade (DE)"});
        let value = localized(&raw, &Locale::new("de-DE")).unwrap();
        assert_eq!(value, "Parade (DE)");
    }

    #[test]
    fn test_localized_missing_key() {
        let raw = json!({"en-GB": "Parade"});
        let err = localized(&raw, &Locale::new("fr-FR")).unwrap_err();
        assert_eq!(err, DecodeError::MissingLocale("fr-FR".into()));
    }

    #[test]
    fn test_timestamp_accepts_rfc3339_and_minute_offset() {
        let full = timestamp(&json!("2024-06-09T11:00:00+01:00")).unwrap();
        let short = timestamp(&json!("2024-06-09T11:00+01:00")).unwrap();
        assert_eq!(full, short);
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        assert!(matches!(
            timestamp(&json!("last tuesday")),
            Err(DecodeError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_content_type_accessor() {
        let raw = json!({
            "sys": {"id": "e1", "contentType": {"sys": {"id": "event"}}},
            "fields": {}
        });
        assert_eq!(content_type(&raw).unwrap(), "event");
        assert!(expect_content_type(&raw, "event").is_ok());
        assert!(matches!(
            expect_content_type(&raw, "sponsor"),
            Err(DecodeError::ContentTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_optional_string_absorbs_shape_errors() {
        let fields = json!({
            "email": {"en-GB": 42},
            "phone": {"de-DE": "030 1234"}
        });
        let fields = fields.as_object().unwrap();
        let locale = Locale::new("en-GB");
        assert_eq!(optional_string(fields, "email", &locale), None);
        assert_eq!(optional_string(fields, "phone", &locale), None);
        assert_eq!(optional_string(fields, "absent", &locale), None);
    }

    #[test]
    fn test_uint_rejects_negative_and_fractional() {
        assert!(uint(&json!(-4)).is_err());
        assert!(uint(&json!(4.5)).is_err());
        assert_eq!(uint(&json!(640)).unwrap(), 640);
    }
}
