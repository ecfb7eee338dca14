//! Application state and the aggregation reducer.
//!
//! The reducer is the single place raw payloads become typed state. Each
//! collection decodes independently through [`crate::decode::filter_map`],
//! so one malformed record drops out without disturbing the rest, and a
//! whole collection that fails to decode (e.g. `entries` is not an array)
//! falls back to empty. A receive transition replaces all six collections
//! atomically; error transitions keep stale data on screen rather than
//! flashing an empty UI.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decode::{
    self, decode_event, decode_featured_events, decode_header_banner, decode_image_details,
    decode_performance, decode_sponsor,
};
use crate::error::DecodeResult;
use crate::locale::Locale;
use crate::model::{Event, FeaturedEvents, HeaderBanner, ImageDetails, Performance, Sponsor};
use crate::recurrence::expand_occurrences;

// =============================================================================
// Actions
// =============================================================================

/// Action tag: a full payload fetch has started.
pub const REQUEST_CMS_DATA: &str = "REQUEST_CMS_DATA";
/// Action tag: a background refresh has started.
pub const REQUEST_UPDATE_CMS_DATA: &str = "REQUEST_UPDATE_CMS_DATA";
/// Action tag: a payload has arrived.
pub const RECEIVE_CMS_DATA: &str = "RECEIVE_CMS_DATA";
/// Action tag: the fetch failed.
pub const RECEIVE_CMS_ERROR: &str = "RECEIVE_CMS_ERROR";

/// The raw payload delivered with [`CmsAction::Receive`].
///
/// Both fields stay untyped: the entry/asset sequences are decoded inside
/// the reducer, and a payload whose `entries` is missing or not an array
/// must degrade to empty collections, not to a deserialization error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmsPayload {
    #[serde(default)]
    pub entries: Value,
    #[serde(default)]
    pub assets: Value,
}

impl CmsPayload {
    /// An empty payload; decodes to empty collections.
    pub fn empty() -> Self {
        Self {
            entries: Value::Null,
            assets: Value::Null,
        }
    }
}

/// Actions the reducer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum CmsAction {
    /// Full fetch started.
    Request,
    /// Background refresh started.
    RequestUpdate,
    /// Payload arrived.
    Receive(CmsPayload),
    /// Fetch failed; the error detail is unused by this layer.
    ReceiveError,
}

impl CmsAction {
    /// Parse a tagged action record from the external dispatch mechanism.
    ///
    /// Returns `None` for an unrecognized or untagged action; the reducer
    /// treats that as the identity transition.
    pub fn from_value(raw: &Value) -> Option<Self> {
        let tag = raw.get("type")?.as_str()?;
        match tag {
            REQUEST_CMS_DATA => Some(Self::Request),
            REQUEST_UPDATE_CMS_DATA => Some(Self::RequestUpdate),
            RECEIVE_CMS_DATA => {
                let data = raw.get("data").cloned().unwrap_or(Value::Null);
                let payload =
                    serde_json::from_value(data).unwrap_or_else(|_| CmsPayload::empty());
                Some(Self::Receive(payload))
            }
            RECEIVE_CMS_ERROR => Some(Self::ReceiveError),
            _ => None,
        }
    }
}

// =============================================================================
// State
// =============================================================================

/// The decoded, process-wide application state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct State {
    /// Concrete event occurrences, payload order, recurrence expanded.
    pub events: Vec<Event>,
    pub featured_events: Vec<FeaturedEvents>,
    pub header_banners: Vec<HeaderBanner>,
    /// Image assets keyed by id; a later record wins on duplicate ids.
    pub images: HashMap<String, ImageDetails>,
    /// Performances keyed by id; a later record wins on duplicate ids.
    pub performances: HashMap<String, Performance>,
    pub sponsors: Vec<Sponsor>,
    /// A full fetch is in flight.
    pub loading: bool,
    /// A background refresh is in flight.
    pub refreshing: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            featured_events: Vec::new(),
            header_banners: Vec::new(),
            images: HashMap::new(),
            performances: HashMap::new(),
            sponsors: Vec::new(),
            loading: true,
            refreshing: false,
        }
    }
}

// =============================================================================
// Collection builders
// =============================================================================

/// Decode the event collection: per-record decode, then recurrence
/// expansion, flattened in payload order.
pub fn decode_events(locale: &Locale, raw: &Value) -> DecodeResult<Vec<Event>> {
    decode::filter_map(raw, |entry| decode_event(locale, entry)).map(|templates| {
        templates
            .into_iter()
            .flat_map(expand_occurrences)
            .collect()
    })
}

/// Decode the featured-events collection, payload order preserved.
pub fn decode_featured_events_collection(
    locale: &Locale,
    raw: &Value,
) -> DecodeResult<Vec<FeaturedEvents>> {
    decode::filter_map(raw, |entry| decode_featured_events(locale, entry))
}

/// Decode the header-banner collection, payload order preserved.
pub fn decode_header_banners(locale: &Locale, raw: &Value) -> DecodeResult<Vec<HeaderBanner>> {
    decode::filter_map(raw, |entry| decode_header_banner(locale, entry))
}

/// Decode the sponsor collection, payload order preserved.
pub fn decode_sponsors(locale: &Locale, raw: &Value) -> DecodeResult<Vec<Sponsor>> {
    decode::filter_map(raw, |entry| decode_sponsor(locale, entry))
}

/// Decode the image collection into an id-keyed map.
pub fn decode_images(
    locale: &Locale,
    raw: &Value,
) -> DecodeResult<HashMap<String, ImageDetails>> {
    decode::filter_map(raw, |asset| decode_image_details(locale, asset))
        .map(|images| reduce_to_map(images, |image| &image.id))
}

/// Decode the performance collection into an id-keyed map.
pub fn decode_performances(
    locale: &Locale,
    raw: &Value,
) -> DecodeResult<HashMap<String, Performance>> {
    decode::filter_map(raw, |entry| decode_performance(locale, entry))
        .map(|performances| reduce_to_map(performances, |performance| &performance.id))
}

/// Fold a decoded sequence into a fresh id-keyed map, left to right, so a
/// later record overwrites an earlier one with the same id.
fn reduce_to_map<T>(items: Vec<T>, id: impl Fn(&T) -> &str) -> HashMap<String, T> {
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        map.insert(id(&item).to_owned(), item);
    }
    map
}

// =============================================================================
// Reducer
// =============================================================================

/// Apply one action to the current state, producing the next state.
///
/// Pure and total: every action maps to a new state value, and only
/// [`CmsAction::Receive`] touches the collections - all six of them, in one
/// transition, each falling back to empty if its sequence fails to decode
/// wholesale.
pub fn reduce(state: &State, action: &CmsAction, locale: &Locale) -> State {
    match action {
        CmsAction::Request => State {
            loading: true,
            refreshing: false,
            ..state.clone()
        },
        CmsAction::RequestUpdate => State {
            loading: false,
            refreshing: true,
            ..state.clone()
        },
        CmsAction::Receive(payload) => State {
            loading: false,
            refreshing: false,
            events: decode_events(locale, &payload.entries).unwrap_or_default(),
            featured_events: decode_featured_events_collection(locale, &payload.entries)
                .unwrap_or_default(),
            header_banners: decode_header_banners(locale, &payload.entries).unwrap_or_default(),
            images: decode_images(locale, &payload.assets).unwrap_or_default(),
            performances: decode_performances(locale, &payload.entries).unwrap_or_default(),
            sponsors: decode_sponsors(locale, &payload.entries).unwrap_or_default(),
        },
        CmsAction::ReceiveError => State {
            loading: false,
            refreshing: false,
            ..state.clone()
        },
    }
}

/// Apply a raw tagged action record; unrecognized actions are the identity.
pub fn reduce_raw(state: &State, action: &Value, locale: &Locale) -> State {
    match CmsAction::from_value(action) {
        Some(action) => reduce(state, &action, locale),
        None => state.clone(),
    }
}
