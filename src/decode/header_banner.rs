//! Decoder for header-banner entries.

use serde_json::Value;

use super::{
    asset_link, entry_fields, entry_id, expect_content_type, field, localized, optional_string,
    string,
};
use crate::error::DecodeResult;
use crate::locale::Locale;
use crate::model::HeaderBanner;

/// Content type tag header-banner entries must declare.
pub const CONTENT_TYPE: &str = "headerBanner";

/// Decode a banner: a required heading and hero image, optional sub-heading.
pub fn decode_header_banner(locale: &Locale, raw: &Value) -> DecodeResult<HeaderBanner> {
    expect_content_type(raw, CONTENT_TYPE)?;
    let id = entry_id(raw)?;
    let fields = entry_fields(raw)?;

    Ok(HeaderBanner {
        id,
        heading: string(localized(field(fields, "heading")?, locale)?)?,
        sub_heading: optional_string(fields, "subHeading", locale),
        hero_image: asset_link(localized(field(fields, "heroImage")?, locale)?)?,
    })
}
