//! Decoder for event entries.
//!
//! Events are the richest content type: localized text, price bounds,
//! timestamps, a venue, a handful of optional contact fields, and an
//! optional recurrence rule. Everything required must be present, correctly
//! shaped, and carry the selected locale key; anything less fails the whole
//! record so the collection decoder drops it.

use serde_json::{Map, Value};

use super::{
    entry_fields, entry_id, expect_content_type, field, localized, number, object,
    optional_asset_link, optional_string, string, string_list, timestamp,
};
use crate::error::DecodeResult;
use crate::locale::Locale;
use crate::model::{Event, Location};
use crate::recurrence::RecurrenceRule;

/// Content type tag event entries must declare.
pub const CONTENT_TYPE: &str = "event";

/// Decode one raw event entry into a typed [`Event`] template.
///
/// The returned event may still carry a recurrence rule; expansion into
/// concrete occurrences happens in the aggregation step.
pub fn decode_event(locale: &Locale, raw: &Value) -> DecodeResult<Event> {
    expect_content_type(raw, CONTENT_TYPE)?;
    let id = entry_id(raw)?;
    let fields = entry_fields(raw)?;

    Ok(Event {
        id,
        name: string(localized(field(fields, "name")?, locale)?)?,
        description: string(localized(field(fields, "eventDescription")?, locale)?)?,
        categories: string_list(localized(field(fields, "eventCategories")?, locale)?)?,
        price_low: number(localized(field(fields, "eventPriceLow")?, locale)?)?,
        price_high: number(localized(field(fields, "eventPriceHigh")?, locale)?)?,
        start_time: timestamp(localized(field(fields, "startTime")?, locale)?)?,
        end_time: timestamp(localized(field(fields, "endTime")?, locale)?)?,
        location: decode_location(fields, locale)?,
        accessibility_details: optional_string(fields, "accessibilityDetails", locale),
        email: optional_string(fields, "email", locale),
        phone: optional_string(fields, "phone", locale),
        ticketing_url: optional_string(fields, "ticketingUrl", locale),
        picture: optional_asset_link(fields, "individualEventPicture", locale),
        recurrence: decode_recurrence(fields)?,
    })
}

/// The venue is split over two raw fields: a localized `location` point
/// (`{lat, lon}`) and a localized `locationName` string.
fn decode_location(fields: &Map<String, Value>, locale: &Locale) -> DecodeResult<Location> {
    let point = object(localized(field(fields, "location")?, locale)?)?;

    Ok(Location {
        lat: number(field(point, "lat")?)?,
        lon: number(field(point, "lon")?)?,
        name: string(localized(field(fields, "locationName")?, locale)?)?,
    })
}

/// `recurrenceRule` is optional and, unlike the user-facing fields, not
/// locale-keyed. A present but malformed rule fails the record; silently
/// ignoring it would store the template as a single bogus occurrence.
fn decode_recurrence(fields: &Map<String, Value>) -> DecodeResult<Option<RecurrenceRule>> {
    match fields.get("recurrenceRule") {
        None => Ok(None),
        Some(raw) => RecurrenceRule::parse(&string(raw)?).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn raw_event() -> Value {
        json!({
            "sys": {"id": "evt-1", "contentType": {"sys": {"id": "event"}}},
            "fields": {
                "name": {"en-GB": "Opening Parade"},
                "eventDescription": {"en-GB": "The parade through town"},
                "eventCategories": {"en-GB": ["Parade", "Music"]},
                "eventPriceLow": {"en-GB": 0},
                "eventPriceHigh": {"en-GB": 0},
                "startTime": {"en-GB": "2024-06-09T11:00:00+01:00"},
                "endTime": {"en-GB": "2024-06-09T13:00:00+01:00"},
                "location": {"en-GB": {"lat": 51.508, "lon": -0.128}},
                "locationName": {"en-GB": "Trafalgar Square"},
                "ticketingUrl": {"en-GB": "https://tickets.example.com/parade"},
                "individualEventPicture": {"en-GB": {"sys": {"id": "asset-9"}}}
            }
        })
    }

    fn locale() -> Locale {
        Locale::new("en-GB")
    }

    #[test]
    fn test_decode_well_formed_event() {
        let event = decode_event(&locale(), &raw_event()).unwrap();

        assert_eq!(event.id, "evt-1");
        assert_eq!(event.name, "Opening Parade");
        assert_eq!(event.categories, vec!["Parade", "Music"]);
        assert_eq!(event.price_low, 0.0);
        assert_eq!(
            event.start_time,
            Utc.with_ymd_and_hms(2024, 6, 9, 10, 0, 0).unwrap()
        );
        assert_eq!(event.location.name, "Trafalgar Square");
        assert_eq!(event.location.lat, 51.508);
        assert_eq!(
            event.ticketing_url.as_deref(),
            Some("https://tickets.example.com/parade")
        );
        assert_eq!(event.picture.as_ref().map(|p| p.id()), Some("asset-9"));
        assert_eq!(event.accessibility_details, None);
        assert_eq!(event.recurrence, None);
    }

    #[test]
    fn test_decode_rejects_content_type_mismatch() {
        let mut raw = raw_event();
        raw["sys"]["contentType"]["sys"]["id"] = json!("sponsor");
        assert!(matches!(
            decode_event(&locale(), &raw),
            Err(DecodeError::ContentTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_missing_required_field() {
        let mut raw = raw_event();
        raw["fields"].as_object_mut().unwrap().remove("startTime");
        assert_eq!(
            decode_event(&locale(), &raw),
            Err(DecodeError::MissingField("startTime".into()))
        );
    }

    #[test]
    fn test_decode_rejects_missing_locale_on_required_field() {
        let raw = raw_event();
        assert_eq!(
            decode_event(&Locale::new("fr-FR"), &raw),
            Err(DecodeError::MissingLocale("fr-FR".into()))
        );
    }

    #[test]
    fn test_decode_rejects_non_numeric_price() {
        let mut raw = raw_event();
        raw["fields"]["eventPriceLow"]["en-GB"] = json!("free");
        assert!(matches!(
            decode_event(&locale(), &raw),
            Err(DecodeError::WrongType { expected: "number", .. })
        ));
    }

    #[test]
    fn test_decode_ignores_unknown_extra_fields() {
        let mut raw = raw_event();
        raw["fields"]["somethingNew"] = json!({"en-GB": true});
        assert!(decode_event(&locale(), &raw).is_ok());
    }

    #[test]
    fn test_decode_parses_recurrence_rule() {
        let mut raw = raw_event();
        raw["fields"]["recurrenceRule"] = json!("FREQ=DAILY;COUNT=3");
        let event = decode_event(&locale(), &raw).unwrap();
        assert!(event.is_recurring());
    }

    #[test]
    fn test_decode_rejects_malformed_recurrence_rule() {
        let mut raw = raw_event();
        raw["fields"]["recurrenceRule"] = json!("every other thursday");
        assert!(matches!(
            decode_event(&locale(), &raw),
            Err(DecodeError::InvalidRecurrence(_))
        ));
    }
}
