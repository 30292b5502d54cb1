//! Presentation API 3 input model.

use super::language::LanguageMap;

/// A `label`/`value` pair, as used by `metadata` and `requiredStatement`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataEntry {
    pub label: LanguageMap,
    pub value: LanguageMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub id: String,
    pub label: Option<LanguageMap>,
    pub summary: Option<LanguageMap>,
    pub metadata: Vec<MetadataEntry>,
    pub required_statement: Option<MetadataEntry>,
    pub rights: Option<String>,
    pub nav_date: Option<String>,
    pub behavior: Vec<String>,
    pub viewing_direction: Option<String>,
    pub thumbnail: Vec<ContentResource>,
    pub items: Vec<Canvas>,
    /// Whether the source carried `structures`. They are never mapped.
    pub has_structures: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Canvas {
    pub id: String,
    pub label: Option<LanguageMap>,
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub thumbnail: Vec<ContentResource>,
    pub items: Vec<AnnotationPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationPage {
    pub id: Option<String>,
    pub items: Vec<Annotation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub id: Option<String>,
    /// Presentation 3 allows a single motivation or a list of them.
    pub motivation: Vec<String>,
    pub body: Option<Body>,
}

impl Annotation {
    pub fn is_painting(&self) -> bool {
        self.motivation.iter().any(|m| m == "painting")
    }
}

/// The resource(s) an annotation paints onto its canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// A single content resource.
    Single(ContentResource),
    /// Alternatives for the same target, either a JSON array body or a
    /// `Choice` object. Order is the publisher's preference order.
    Choice(Vec<ContentResource>),
}

/// An external resource such as an image, a thumbnail, or a video.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentResource {
    pub id: Option<String>,
    /// The `type` property (`Image`, `Video`, ...).
    pub kind: Option<String>,
    pub format: Option<String>,
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub service: Vec<Service>,
}

impl ContentResource {
    /// `type: "Image"`, or no type at all with an `image/*` format.
    pub fn is_image(&self) -> bool {
        match self.kind.as_deref() {
            Some(kind) => kind == "Image",
            None => self
                .format
                .as_deref()
                .is_some_and(|format| format.starts_with("image/")),
        }
    }
}

/// A service reference, typically an IIIF Image API endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Service {
    pub id: Option<String>,
    pub kind: Option<String>,
    pub profile: Option<String>,
}
