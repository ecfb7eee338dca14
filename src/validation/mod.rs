//! JSON Schema validation for raw CMS payloads.
//!
//! Advisory pre-checks over the untyped payload using JSON Schema Draft 7.
//! The decoding core never depends on these; the pipeline and CLI run them
//! to report a malformed envelope before decoding silently drops most of it.
//!
//! # Embedded Schemas
//!
//! Schemas are embedded at compile time from the `schemas/` directory:
//! - `cms-payload.json` - the envelope (`entries` and `assets` sequences)
//! - `cms-entry.json` - one entry record (id, content type, fields)

use serde_json::Value;

/// Validate a JSON value against a schema.
///
/// # Returns
/// * `Ok(())` when valid
/// * `Err(Vec<String>)` with every violation otherwise
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Boolean-only variant of [`validate`].
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate a raw payload envelope.
pub fn validate_payload(data: &Value) -> Result<(), Vec<String>> {
    let schema: Value = serde_json::from_str(include_str!("../../schemas/cms-payload.json"))
        .expect("Invalid embedded schema");
    validate(&schema, data)
}

/// Quick check against the payload schema.
pub fn is_valid_payload(data: &Value) -> bool {
    let schema: Value = serde_json::from_str(include_str!("../../schemas/cms-payload.json"))
        .expect("Invalid embedded schema");
    is_valid(&schema, data)
}

/// Validate one raw entry record.
pub fn validate_entry(data: &Value) -> Result<(), Vec<String>> {
    let schema: Value = serde_json::from_str(include_str!("../../schemas/cms-entry.json"))
        .expect("Invalid embedded schema");
    validate(&schema, data)
}

/// Quick check against the entry schema.
pub fn is_valid_entry(data: &Value) -> bool {
    let schema: Value = serde_json::from_str(include_str!("../../schemas/cms-entry.json"))
        .expect("Invalid embedded schema");
    is_valid(&schema, data)
}
