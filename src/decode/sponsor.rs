//! Decoder for sponsor entries.

use serde_json::Value;

use super::{asset_link, entry_fields, entry_id, expect_content_type, field, localized, string};
use crate::error::DecodeResult;
use crate::locale::Locale;
use crate::model::Sponsor;

/// Content type tag sponsor entries must declare.
pub const CONTENT_TYPE: &str = "sponsor";

/// Decode a sponsor entry. All fields are required.
pub fn decode_sponsor(locale: &Locale, raw: &Value) -> DecodeResult<Sponsor> {
    expect_content_type(raw, CONTENT_TYPE)?;
    let id = entry_id(raw)?;
    let fields = entry_fields(raw)?;

    Ok(Sponsor {
        id,
        name: string(localized(field(fields, "sponsorName")?, locale)?)?,
        logo: asset_link(localized(field(fields, "sponsorLogo")?, locale)?)?,
        url: string(localized(field(fields, "sponsorUrl")?, locale)?)?,
        level: string(localized(field(fields, "sponsorLevel")?, locale)?)?,
    })
}
