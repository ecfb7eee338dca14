//! Decoder for image assets.
//!
//! Assets live in the payload's `assets` sequence and use a different
//! envelope from entries: no content type, a `sys.type` of `"Asset"`, and a
//! localized `file` field carrying the URL and pixel dimensions.

use serde_json::Value;

use super::{entry_fields, entry_id, expect_asset, field, localized, object, string, uint};
use crate::error::DecodeResult;
use crate::locale::Locale;
use crate::model::ImageDetails;

/// Decode one raw asset into image details.
pub fn decode_image_details(locale: &Locale, raw: &Value) -> DecodeResult<ImageDetails> {
    expect_asset(raw)?;
    let id = entry_id(raw)?;
    let fields = entry_fields(raw)?;

    let file = object(localized(field(fields, "file")?, locale)?)?;
    let details = object(field(file, "details")?)?;
    let image = object(field(details, "image")?)?;

    Ok(ImageDetails {
        id,
        url: string(field(file, "url")?)?,
        width: uint(field(image, "width")?)?,
        height: uint(field(image, "height")?)?,
    })
}
