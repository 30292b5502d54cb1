//! Canvas level: painting annotations and body resolution.

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::model::language::flatten_or_empty;
use crate::model::v2;
use crate::model::v3::{Annotation, Body, Canvas, ContentResource};

use super::resource;

/// Map one canvas, or drop it when it paints no image.
///
/// Annotation pages are scanned in order, then each page's annotations in
/// order; only `painting` annotations are considered. Every one of them
/// whose body resolves to an image becomes an entry of `images`. A canvas
/// left with no image is dropped and reported.
pub fn map_canvas(
    canvas: Canvas,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<v2::Canvas> {
    let Canvas {
        id,
        label,
        width,
        height,
        thumbnail,
        items: pages,
    } = canvas;

    let painting: Vec<(String, Annotation)> = pages
        .into_iter()
        .enumerate()
        .flat_map(|(p, page)| {
            page.items
                .into_iter()
                .enumerate()
                .map(move |(a, anno)| (format!("{path}/items/{p}/items/{a}"), anno))
        })
        .filter(|(_, anno)| anno.is_painting())
        .collect();

    if painting.is_empty() {
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::NoPaintingAnnotation,
            id.as_str(),
            path,
            format!("canvas '{id}' has no painting annotation; dropped"),
        ));
        return None;
    }

    let images: Vec<v2::ImageAnnotation> = painting
        .into_iter()
        .filter_map(|(anno_path, anno)| {
            map_painting_annotation(anno, &id, &anno_path, diagnostics)
        })
        .collect();

    if images.is_empty() {
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::NoImageBody,
            id.as_str(),
            path,
            format!("canvas '{id}' has no resolvable image body; dropped"),
        ));
        return None;
    }

    Some(v2::Canvas {
        label: flatten_or_empty(label.as_ref()),
        width,
        height,
        thumbnail: resource::map_thumbnail(thumbnail),
        images,
        id,
        kind: v2::CANVAS_TYPE,
    })
}

/// Bind a painting annotation's image to the canvas `canvas_id`.
fn map_painting_annotation(
    anno: Annotation,
    canvas_id: &str,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<v2::ImageAnnotation> {
    // Diagnostics about an anonymous annotation are filed against its canvas.
    let owner = anno.id.clone().unwrap_or_else(|| canvas_id.to_string());

    let body = resolve_body(anno.body, &owner, path, diagnostics)?;
    let resource = resource::map_image_resource(body, &owner, path, diagnostics)?;

    Some(v2::ImageAnnotation {
        id: anno.id,
        kind: v2::ANNOTATION_TYPE,
        motivation: v2::PAINTING_MOTIVATION,
        resource,
        on: canvas_id.to_string(),
    })
}

/// Reduce a body to a single content resource.
///
/// A multi-body keeps its first entry; the alternatives are reported as
/// dropped.
pub fn resolve_body(
    body: Option<Body>,
    owner: &str,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<ContentResource> {
    let alternatives = match body {
        Some(Body::Single(resource)) => return Some(resource),
        Some(Body::Choice(alternatives)) => alternatives,
        None => {
            diagnostics.push(Diagnostic::warning(
                DiagnosticKind::UnresolvableBody,
                owner,
                path,
                format!("painting annotation '{owner}' has no body"),
            ));
            return None;
        }
    };

    let mut alternatives = alternatives.into_iter();
    let Some(kept) = alternatives.next() else {
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::UnresolvableBody,
            owner,
            path,
            format!("painting annotation '{owner}' has an empty choice body"),
        ));
        return None;
    };

    let dropped: Vec<String> = alternatives
        .map(|alt| alt.id.unwrap_or_default())
        .collect();
    if !dropped.is_empty() {
        let kept_id = kept.id.clone().unwrap_or_default();
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::ChoiceCollapsed {
                kept: kept_id.clone(),
                dropped: dropped.clone(),
            },
            owner,
            format!("{path}/body"),
            format!(
                "choice on '{owner}' collapsed to '{kept_id}'; dropped {}",
                dropped.join(", ")
            ),
        ));
    }
    Some(kept)
}
