//! Domain models for decoded CMS content.
//!
//! This module contains the typed entities the decoding layer produces:
//!
//! - [`Event`] - one concrete event occurrence (post recurrence expansion)
//! - [`FeaturedEvents`] - a curated, ordered list of event ids
//! - [`HeaderBanner`] - a banner shown above the event listing
//! - [`ImageDetails`] - a resolved image asset
//! - [`Performance`] - a stage performance slot
//! - [`Sponsor`] - a sponsor entry
//!
//! All localized fields are already resolved to the configured locale; the
//! structs hold plain values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::recurrence::RecurrenceRule;

// =============================================================================
// Asset references
// =============================================================================

/// Reference to an asset record by id.
///
/// Raw records link assets as `{ "sys": { "id": "..." } }`; decoding keeps
/// only the id. Resolving the reference to an [`ImageDetails`] goes through
/// the `images` collection on [`crate::state::State`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);

impl AssetRef {
    /// The linked asset's id.
    pub fn id(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Event
// =============================================================================

/// Geographic venue of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    /// Human-readable venue name.
    pub name: String,
}

/// A single event occurrence.
///
/// After recurrence expansion every `Event` held in state describes one
/// concrete occurrence with resolved start and end times; templates carrying
/// a recurrence rule are never stored directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub description: String,
    pub categories: Vec<String>,
    /// Lower price bound. An event is free iff both bounds are exactly 0.
    pub price_low: f64,
    /// Upper price bound.
    pub price_high: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticketing_url: Option<String>,
    /// Event-specific picture, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<AssetRef>,
    /// Recurrence rule of the template this occurrence came from.
    /// `None` once expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
}

impl Event {
    /// Whether this event still carries an unexpanded recurrence rule.
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }
}

// =============================================================================
// Simple ordered collections
// =============================================================================

/// A curated list of events, referenced by entry id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedEvents {
    pub id: String,
    pub title: String,
    /// Linked event entry ids, in curated order.
    pub events: Vec<String>,
}

/// A banner shown above the event listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderBanner {
    pub id: String,
    pub heading: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_heading: Option<String>,
    pub hero_image: AssetRef,
}

/// A sponsor entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sponsor {
    pub id: String,
    pub name: String,
    pub logo: AssetRef,
    pub url: String,
    /// Sponsorship tier, e.g. "Headline" or "Gold".
    pub level: String,
}

// =============================================================================
// Id-keyed collections
// =============================================================================

/// A resolved image asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDetails {
    pub id: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// A stage performance slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    pub id: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_event() -> Event {
        Event {
            id: "evt-1".into(),
            name: "Opening Parade".into(),
            description: "The parade through town".into(),
            categories: vec!["Parade".into()],
            price_low: 0.0,
            price_high: 0.0,
            start_time: Utc.with_ymd_and_hms(2024, 6, 9, 11, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 6, 9, 13, 0, 0).unwrap(),
            location: Location {
                lat: 51.5,
                lon: -0.12,
                name: "Trafalgar Square".into(),
            },
            accessibility_details: None,
            email: None,
            phone: None,
            ticketing_url: None,
            picture: None,
            recurrence: None,
        }
    }

    #[test]
    fn test_event_serialization_skips_absent_optionals() {
        let json = serde_json::to_string(&sample_event()).unwrap();
        assert!(json.contains("Opening Parade"));
        assert!(!json.contains("accessibility_details"));
        assert!(!json.contains("ticketing_url"));
    }

    #[test]
    fn test_asset_ref_transparent() {
        let reference: AssetRef = serde_json::from_str("\"asset-7\"").unwrap();
        assert_eq!(reference.id(), "asset-7");
    }

    #[test]
    fn test_event_is_recurring() {
        assert!(!sample_event().is_recurring());
    }
}
