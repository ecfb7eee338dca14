//! # Cmsload - CMS payload decoding and normalization
//!
//! Cmsload turns an untyped content payload (entries and assets from a
//! content-management backend) into strongly-typed, internally-consistent
//! application state.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Raw payload │────▶│  Decoders   │────▶│ Recurrence  │────▶│    State    │
//! │ (entries +  │     │ (per entity,│     │  expansion  │     │ (reducer +  │
//! │  assets)    │     │  per locale)│     │  (events)   │     │  selectors) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Each record decodes independently; a malformed record is dropped and the
//! rest of the batch survives. A collection that fails to decode wholesale
//! falls back to empty. Nothing in the core logs, panics, or performs I/O.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cmsload::{decode_file, DecodeOptions};
//!
//! let result = decode_file("payload.json", &DecodeOptions::default())?;
//! println!("decoded {} events", result.state.events.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - error hierarchy
//! - [`locale`] - locale key and configuration
//! - [`model`] - typed entities
//! - [`decode`] - decoder primitives and per-entity decoders
//! - [`recurrence`] - recurrence rules and occurrence expansion
//! - [`state`] - application state and the aggregation reducer
//! - [`select`] - read-side queries over decoded state
//! - [`validation`] - payload schema validation
//! - [`report`] - decode-run reporting channel
//! - [`pipeline`] - high-level orchestration

// Core modules
pub mod error;
pub mod locale;
pub mod model;

// Decoding
pub mod decode;
pub mod recurrence;

// Aggregation
pub mod select;
pub mod state;

// Validation
pub mod validation;

// Reporting
pub mod report;

// Orchestration
pub mod pipeline;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{DecodeError, DecodeResult, PipelineError};

// =============================================================================
// Re-exports - Locale
// =============================================================================

pub use locale::{Locale, DEFAULT_LOCALE, LOCALE_ENV_VAR};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use model::{
    AssetRef,
    Event,
    FeaturedEvents,
    HeaderBanner,
    ImageDetails,
    Location,
    Performance,
    Sponsor,
};

// =============================================================================
// Re-exports - Decoders
// =============================================================================

pub use decode::{
    decode_event,
    decode_featured_events,
    decode_header_banner,
    decode_image_details,
    decode_performance,
    decode_sponsor,
    filter_map,
};

// =============================================================================
// Re-exports - Recurrence
// =============================================================================

pub use recurrence::{expand_occurrences, Frequency, RecurrenceRule, MAX_OCCURRENCES};

// =============================================================================
// Re-exports - State
// =============================================================================

pub use state::{reduce, reduce_raw, CmsAction, CmsPayload, State};

// =============================================================================
// Re-exports - Selectors
// =============================================================================

pub use select::{
    filter_events,
    group_events_by_start_time,
    is_free,
    select_event_is_free,
    select_events,
    select_events_loading,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{
    is_valid,
    is_valid_entry,
    is_valid_payload,
    validate,
    validate_entry,
    validate_payload,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{
    decode_bytes,
    decode_file,
    decode_payload,
    DecodeOptions,
    DecodeStats,
    PipelineOutput,
};
