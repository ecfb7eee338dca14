//! High-level pipeline API for payload decoding.
//!
//! Combines the steps an embedder or the CLI wants as one call: read the
//! payload, optionally schema-check the envelope, run one receive transition
//! through the reducer, and audit what was dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use cmsload::pipeline::{decode_file, DecodeOptions};
//!
//! let result = decode_file("payload.json", &DecodeOptions::default())?;
//! println!("{} events decoded", result.state.events.len());
//! ```
//!
//! The decoding core never reports anything; all observability lives here,
//! emitted through [`crate::report`].

use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;

use crate::decode::{
    self, decode_event, decode_featured_events, decode_header_banner, decode_image_details,
    decode_performance, decode_sponsor, event, featured_events, header_banner, performance,
    sponsor,
};
use crate::error::{PipelineError, PipelineResult as Result};
use crate::locale::Locale;
use crate::report::{log_info, log_success, log_warning};
use crate::state::{reduce, CmsAction, CmsPayload, State};
use crate::validation::validate_payload;

/// Options for a decode run.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Locale every localized field is resolved to.
    pub locale: Locale,

    /// Skip the advisory envelope schema check.
    pub skip_validation: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            skip_validation: false,
        }
    }
}

/// What happened during one decode run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeStats {
    /// Raw records in the payload's entry sequence.
    pub entries: usize,
    /// Raw records in the payload's asset sequence.
    pub assets: usize,
    /// Recognized records that decoded successfully (event templates
    /// counted before recurrence expansion).
    pub decoded: usize,
    /// Recognized records that failed decoding and were dropped.
    pub dropped: usize,
    /// Entries with a content type no decoder handles.
    pub unrecognized: usize,
    /// Event occurrences in the resulting state, after expansion.
    pub occurrences: usize,
}

/// Result of a complete decode run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The decoded application state.
    pub state: State,
    /// Run statistics.
    pub stats: DecodeStats,
}

/// Decode a payload file.
pub fn decode_file<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<PipelineOutput> {
    let bytes = std::fs::read(path.as_ref())?;
    decode_bytes(&bytes, options)
}

/// Decode raw payload bytes (a JSON document).
pub fn decode_bytes(bytes: &[u8], options: &DecodeOptions) -> Result<PipelineOutput> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(PipelineError::EmptyPayload);
    }

    let raw: Value = serde_json::from_slice(bytes)?;
    let payload: CmsPayload = serde_json::from_value(raw)?;
    Ok(decode_payload(payload, options))
}

/// Decode an in-memory payload.
///
/// This is the whole pipeline minus I/O: an optional envelope check
/// (warnings only, never fatal - decoding degrades to empty collections on
/// its own terms), one receive transition from the initial state, and a
/// per-record audit for the stats.
pub fn decode_payload(payload: CmsPayload, options: &DecodeOptions) -> PipelineOutput {
    log_info(format!("decoding payload (locale {})", options.locale));

    if !options.skip_validation {
        let envelope = json!({
            "entries": payload.entries.clone(),
            "assets": payload.assets.clone(),
        });
        if let Err(errors) = validate_payload(&envelope) {
            log_warning(format!(
                "payload failed schema validation: {}",
                errors.join("; ")
            ));
        }
    }

    let stats_base = audit_payload(&options.locale, &payload);
    let state = reduce(&State::default(), &CmsAction::Receive(payload), &options.locale);

    let stats = DecodeStats {
        occurrences: state.events.len(),
        ..stats_base
    };

    log_success(format!(
        "decoded {} of {} records",
        stats.decoded,
        stats.entries + stats.assets
    ));
    if stats.dropped > 0 {
        log_warning(format!("{} malformed records dropped", stats.dropped));
    }
    if stats.unrecognized > 0 {
        log_info(format!(
            "{} entries with unrecognized content types ignored",
            stats.unrecognized
        ));
    }

    PipelineOutput { state, stats }
}

/// Re-run every record through its decoder to count successes and drops.
///
/// The reducer itself keeps no failure detail, so the audit is a second,
/// independent pass over the raw sequences.
fn audit_payload(locale: &Locale, payload: &CmsPayload) -> DecodeStats {
    let mut stats = DecodeStats::default();

    if let Ok(entries) = decode::array(&payload.entries) {
        stats.entries = entries.len();
        for entry in entries {
            match decode::content_type(entry).as_deref() {
                Ok(event::CONTENT_TYPE) => tally(&mut stats, decode_event(locale, entry).is_ok()),
                Ok(featured_events::CONTENT_TYPE) => {
                    tally(&mut stats, decode_featured_events(locale, entry).is_ok())
                }
                Ok(header_banner::CONTENT_TYPE) => {
                    tally(&mut stats, decode_header_banner(locale, entry).is_ok())
                }
                Ok(performance::CONTENT_TYPE) => {
                    tally(&mut stats, decode_performance(locale, entry).is_ok())
                }
                Ok(sponsor::CONTENT_TYPE) => tally(&mut stats, decode_sponsor(locale, entry).is_ok()),
                Ok(_) => stats.unrecognized += 1,
                // No readable content type at all: the record can't reach
                // any decoder, count it as dropped.
                Err(_) => stats.dropped += 1,
            }
        }
    }

    if let Ok(assets) = decode::array(&payload.assets) {
        stats.assets = assets.len();
        for asset in assets {
            tally(&mut stats, decode_image_details(locale, asset).is_ok());
        }
    }

    stats
}

fn tally(stats: &mut DecodeStats, decoded: bool) {
    if decoded {
        stats.decoded += 1;
    } else {
        stats.dropped += 1;
    }
}
