//! # iiif-downgrade-core
//!
//! Convert IIIF Presentation API 3 manifests into Presentation API 2.1
//! manifests.
//!
//! Only single images and simple image sequences have a faithful v2
//! equivalent, and that is the subset this crate maps. The conversion is a
//! single pass:
//!
//! ```text
//! JSON ──parser──▶ v3 model ──mapper──▶ v2 model ──serializer──▶ JSON
//! ```
//!
//! Anything outside the subset either fails the whole conversion
//! ([`ConvertError::UnsupportedShape`], e.g. a Collection) or is dropped
//! with a [`Diagnostic`] (e.g. a canvas that paints no image). A successful
//! conversion can still be incomplete: check
//! [`ConvertResult::diagnostics`].
//!
//! ```
//! use iiif_downgrade_core::{convert, ConvertOptions};
//! use serde_json::json;
//!
//! let v3 = json!({
//!     "id": "https://example.org/m1",
//!     "type": "Manifest",
//!     "label": { "en": ["Title"] },
//!     "items": []
//! });
//! let result = convert(&v3, &ConvertOptions::default()).unwrap();
//! assert_eq!(result.manifest["@type"], "sc:Manifest");
//! assert_eq!(result.manifest["label"], "Title");
//! ```

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod mapper;
pub mod model;
pub mod parser;
pub mod serializer;

pub use config::ConvertOptions;
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use error::{ConvertError, ErrorCode};

use serde::Serialize;
use serde_json::Value;

/// A converted manifest and the warnings raised while producing it.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResult {
    /// The Presentation 2 manifest.
    pub manifest: Value,
    /// Non-fatal findings, in document order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Convert a Presentation 3 manifest to Presentation 2.
///
/// # Errors
///
/// Returns [`ConvertError`] if the input lacks a mandatory field or is not a
/// manifest made of canvases. No partial output is produced in that case.
pub fn convert(manifest: &Value, options: &ConvertOptions) -> Result<ConvertResult, ConvertError> {
    let parsed = parser::parse_manifest(manifest)?;
    tracing::debug!(
        manifest = %parsed.id,
        canvases = parsed.items.len(),
        "parsed v3 manifest"
    );

    let mapped = mapper::map_manifest(parsed, options);
    tracing::debug!(
        canvases = mapped.manifest.sequences[0].canvases.len(),
        diagnostics = mapped.diagnostics.len(),
        "mapped to v2"
    );

    Ok(ConvertResult {
        manifest: serializer::to_value(&mapped.manifest)?,
        diagnostics: mapped.diagnostics,
    })
}

/// Like [`convert`], from JSON text.
pub fn convert_str(json: &str, options: &ConvertOptions) -> Result<ConvertResult, ConvertError> {
    let manifest: Value = serde_json::from_str(json)?;
    convert(&manifest, options)
}
