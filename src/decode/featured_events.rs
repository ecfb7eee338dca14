//! Decoder for featured-events entries.

use serde_json::Value;

use super::{entry_fields, entry_id, expect_content_type, field, localized, string};
use crate::error::DecodeResult;
use crate::locale::Locale;
use crate::model::FeaturedEvents;

/// Content type tag featured-events entries must declare.
pub const CONTENT_TYPE: &str = "featuredEvents";

/// Decode a curated list of event links.
///
/// The `events` field is a localized array of entry links; the curated order
/// is preserved. A malformed link fails the whole record.
pub fn decode_featured_events(locale: &Locale, raw: &Value) -> DecodeResult<FeaturedEvents> {
    expect_content_type(raw, CONTENT_TYPE)?;
    let id = entry_id(raw)?;
    let fields = entry_fields(raw)?;

    let links = super::array(localized(field(fields, "events")?, locale)?)?;
    let events = links
        .iter()
        .map(super::entry_id)
        .collect::<DecodeResult<Vec<String>>>()?;

    Ok(FeaturedEvents {
        id,
        title: string(localized(field(fields, "title")?, locale)?)?,
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use serde_json::json;

    fn raw_featured() -> Value {
        json!({
            "sys": {"id": "feat-1", "contentType": {"sys": {"id": "featuredEvents"}}},
            "fields": {
                "title": {"en-GB": "Editor's picks"},
                "events": {"en-GB": [
                    {"sys": {"id": "evt-2"}},
                    {"sys": {"id": "evt-7"}}
                ]}
            }
        })
    }

    #[test]
    fn test_decode_featured_events() {
        let featured = decode_featured_events(&Locale::new("en-GB"), &raw_featured()).unwrap();
        assert_eq!(featured.title, "Editor's picks");
        assert_eq!(featured.events, vec!["evt-2", "evt-7"]);
    }

    #[test]
    fn test_decode_rejects_malformed_link() {
        let mut raw = raw_featured();
        raw["fields"]["events"]["en-GB"][1] = json!({"id": "evt-7"});
        assert!(matches!(
            decode_featured_events(&Locale::new("en-GB"), &raw),
            Err(DecodeError::MissingField(_))
        ));
    }
}
