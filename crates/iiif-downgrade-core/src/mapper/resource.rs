//! Content resources: painted images, image services and thumbnails.

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::model::v2;
use crate::model::v3::{ContentResource, Service};

/// Turn a resolved body into a v2 image resource.
///
/// Returns `None`, with a diagnostic against `owner`, when the body is not
/// an image or has no identifier.
pub fn map_image_resource(
    body: ContentResource,
    owner: &str,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<v2::ImageResource> {
    if !body.is_image() {
        let body_type = body
            .kind
            .or(body.format)
            .unwrap_or_else(|| "unknown".to_string());
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::UnsupportedBodyType {
                body_type: body_type.clone(),
            },
            owner,
            path,
            format!("painting annotation '{owner}' paints a '{body_type}', not an image"),
        ));
        return None;
    }

    let Some(id) = body.id else {
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::UnresolvableBody,
            owner,
            path,
            format!("image body of '{owner}' has no identifier"),
        ));
        return None;
    };

    Some(v2::ImageResource {
        id,
        kind: v2::IMAGE_TYPE,
        format: body.format,
        width: body.width,
        height: body.height,
        service: map_image_service(body.service),
    })
}

/// The first thumbnail with an identifier.
pub fn map_thumbnail(thumbnails: Vec<ContentResource>) -> Option<v2::Thumbnail> {
    let thumbnail = thumbnails.into_iter().find(|t| t.id.is_some())?;
    Some(v2::Thumbnail {
        id: thumbnail.id?,
        service: map_image_service(thumbnail.service),
    })
}

/// The first service with an identifier, as a v2 image service reference.
///
/// Context and profile always name the same Image API version.
/// `ImageService3` endpoints keep the Image API 3 context and their bare
/// compliance level; anything else is assumed to speak Image API 2.
pub fn map_image_service(services: Vec<Service>) -> Option<v2::ImageService> {
    let service = services.into_iter().find(|s| s.id.is_some())?;
    let (context, profile) = match service.kind.as_deref() {
        Some("ImageService3") => (v2::IMAGE_CONTEXT_3, service.profile),
        _ => (v2::IMAGE_CONTEXT_2, service.profile.map(expand_profile)),
    };
    Some(v2::ImageService {
        context,
        id: service.id?,
        profile,
    })
}

/// Expand a bare compliance level (`level1`) to its Image API 2 profile URI.
fn expand_profile(profile: String) -> String {
    match profile.as_str() {
        "level0" | "level1" | "level2" => {
            format!("http://iiif.io/api/image/2/{profile}.json")
        }
        _ => profile,
    }
}
