//! Serializer: Presentation 2 model → JSON.
//!
//! Output uses the JSON-LD 1.0 key spelling (`@context`, `@id`, `@type`).
//! Keys appear in model declaration order, so a given manifest always
//! serializes to the same bytes.

use serde_json::Value;

use crate::error::ConvertError;
use crate::model::v2::Manifest;

pub fn to_value(manifest: &Manifest) -> Result<Value, ConvertError> {
    Ok(serde_json::to_value(manifest)?)
}

pub fn to_string_pretty(manifest: &Manifest) -> Result<String, ConvertError> {
    Ok(serde_json::to_string_pretty(manifest)?)
}
