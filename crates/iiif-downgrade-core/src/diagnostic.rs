//! Non-fatal findings recorded while mapping a manifest.

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic. Every finding the mapper records today is a
/// warning: the conversion carried on and produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
}

/// A warning attached to one sub-resource of the input manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Classification of the finding.
    pub kind: DiagnosticKind,
    /// Identifier of the affected resource (canvas, annotation or manifest).
    pub resource_id: String,
    /// JSON Pointer fragment into the input document (e.g. "#/items/3/items/0/items/1").
    pub path: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of mapping diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A canvas carried no annotation with `motivation: "painting"` and was dropped.
    NoPaintingAnnotation,
    /// A canvas had painting annotations but none resolved to an image; it was dropped.
    NoImageBody,
    /// A painting annotation had no body with a usable identifier.
    UnresolvableBody,
    /// A painting annotation's body is not an image.
    UnsupportedBodyType { body_type: String },
    /// A multi-body (or `Choice`) annotation was reduced to its first entry.
    ChoiceCollapsed { kept: String, dropped: Vec<String> },
    /// A manifest `behavior` value has no v2 `viewingHint` equivalent.
    UnsupportedBehavior { behavior: String },
}

impl Diagnostic {
    /// Build a warning and emit it as a `tracing::debug!` event.
    pub fn warning(
        kind: DiagnosticKind,
        resource_id: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let diagnostic = Self {
            severity: Severity::Warning,
            kind,
            resource_id: resource_id.into(),
            path: path.into(),
            message: message.into(),
        };
        tracing::debug!(
            resource = %diagnostic.resource_id,
            path = %diagnostic.path,
            "{}",
            diagnostic.message
        );
        diagnostic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_diagnostic_serializes_tagged_kind() {
        let d = Diagnostic::warning(
            DiagnosticKind::ChoiceCollapsed {
                kept: "img1".to_string(),
                dropped: vec!["img2".to_string()],
            },
            "a1",
            "#/items/0/items/0/items/0",
            "choice collapsed",
        );
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["severity"], json!("warning"));
        assert_eq!(json["kind"]["type"], json!("choice_collapsed"));
        assert_eq!(json["kind"]["dropped"], json!(["img2"]));
        assert_eq!(json["resource_id"], json!("a1"));
    }
}
