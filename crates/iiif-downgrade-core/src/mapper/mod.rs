//! Mapper: Presentation 3 model → Presentation 2 model.
//!
//! The v3 hierarchy is shallow and fixed (Manifest → Canvas →
//! AnnotationPage → Annotation), so each level has its own function and
//! decides for itself what is carried over. Nothing here fails: anything
//! outside the supported subset is either dropped silently (`structures`)
//! or dropped with a [`Diagnostic`] (canvases without an image).
//!
//! - [`canvas`]: canvases, painting annotations and body resolution.
//! - [`resource`]: image resources, image services and thumbnails.

pub mod canvas;
pub mod resource;

use crate::config::ConvertOptions;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::model::language::flatten_or_empty;
use crate::model::v2;
use crate::model::v3;
use crate::model::LanguageMap;

/// Viewing hints defined by Presentation 2.1.
pub const V2_VIEWING_HINTS: &[&str] = &[
    "individuals",
    "paged",
    "continuous",
    "multi-part",
    "non-paged",
    "top",
    "facing-pages",
];

/// Output of [`map_manifest`]: the v2 manifest plus every non-fatal finding,
/// in document order.
#[derive(Debug)]
pub struct MapResult {
    pub manifest: v2::Manifest,
    pub diagnostics: Vec<Diagnostic>,
}

/// Identifier given to the single v2 sequence of a manifest.
///
/// Presentation 3 has no sequence object, so the identifier is synthesized
/// as `<manifest-id>/sequence/normal`.
pub fn sequence_id(manifest_id: &str) -> String {
    format!("{manifest_id}/sequence/normal")
}

/// Convert a parsed Presentation 3 manifest.
///
/// Consumes the v3 tree; identifiers and strings are moved, not copied.
pub fn map_manifest(manifest: v3::Manifest, options: &ConvertOptions) -> MapResult {
    let mut diagnostics = Vec::new();

    let id = options
        .manifest_id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or(manifest.id);

    if manifest.has_structures {
        tracing::debug!(manifest = %id, "ignoring 'structures'; ranges have no mapping");
    }

    let viewing_hint = map_behavior(manifest.behavior, &id, &mut diagnostics);

    // Without a manifest thumbnail, the first canvas's stands in for it. It
    // is taken before mapping since that canvas may be dropped.
    let thumbnail = resource::map_thumbnail(manifest.thumbnail).or_else(|| {
        manifest
            .items
            .first()
            .and_then(|first| resource::map_thumbnail(first.thumbnail.clone()))
    });

    let canvases = manifest
        .items
        .into_iter()
        .enumerate()
        .filter_map(|(i, c)| canvas::map_canvas(c, &format!("#/items/{i}"), &mut diagnostics))
        .collect();

    let mapped = v2::Manifest {
        context: v2::PRESENTATION_CONTEXT,
        kind: v2::MANIFEST_TYPE,
        label: flatten_or_empty(manifest.label.as_ref()),
        description: flatten(manifest.summary.as_ref()),
        metadata: manifest.metadata.into_iter().map(map_metadata).collect(),
        attribution: manifest
            .required_statement
            .and_then(|statement| flatten(Some(&statement.value))),
        license: manifest.rights,
        nav_date: manifest.nav_date,
        viewing_hint,
        viewing_direction: manifest.viewing_direction,
        thumbnail,
        sequences: vec![v2::Sequence {
            id: sequence_id(&id),
            kind: v2::SEQUENCE_TYPE,
            canvases,
        }],
        id,
    };

    MapResult {
        manifest: mapped,
        diagnostics,
    }
}

/// Flatten label and value independently.
pub fn map_metadata(entry: v3::MetadataEntry) -> v2::MetadataEntry {
    v2::MetadataEntry {
        label: flatten_or_empty(Some(&entry.label)),
        value: flatten_or_empty(Some(&entry.value)),
    }
}

fn flatten(map: Option<&LanguageMap>) -> Option<String> {
    map.and_then(LanguageMap::flatten).map(str::to_string)
}

/// Pick the first behavior v2 understands as a `viewingHint`. Every other
/// behavior is reported, since v2 carries a single hint.
fn map_behavior(
    behavior: Vec<String>,
    manifest_id: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<String> {
    let mut hint = None;
    for (i, value) in behavior.into_iter().enumerate() {
        if hint.is_none() && V2_VIEWING_HINTS.contains(&value.as_str()) {
            hint = Some(value);
            continue;
        }
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::UnsupportedBehavior {
                behavior: value.clone(),
            },
            manifest_id,
            format!("#/behavior/{i}"),
            format!("behavior '{value}' not carried over as a viewingHint"),
        ));
    }
    hint
}
