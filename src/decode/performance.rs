//! Decoder for performance entries.

use serde_json::Value;

use super::{entry_fields, entry_id, expect_content_type, field, localized, string, timestamp};
use crate::error::DecodeResult;
use crate::locale::Locale;
use crate::model::Performance;

/// Content type tag performance entries must declare.
pub const CONTENT_TYPE: &str = "performance";

/// Decode a stage performance slot.
pub fn decode_performance(locale: &Locale, raw: &Value) -> DecodeResult<Performance> {
    expect_content_type(raw, CONTENT_TYPE)?;
    let id = entry_id(raw)?;
    let fields = entry_fields(raw)?;

    Ok(Performance {
        id,
        title: string(localized(field(fields, "title")?, locale)?)?,
        start_time: timestamp(localized(field(fields, "startTime")?, locale)?)?,
    })
}
