//! Error types for manifest conversion.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable, machine-readable error codes.
///
/// Variant names and their serialized `snake_case` strings are part of the
/// public contract; CLI wrappers and JSON consumers match on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorCode {
    /// Invalid JSON, or a manifest missing mandatory fields.
    MalformedInput,
    /// A recognizable IIIF object outside the supported subset.
    UnsupportedShape,
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("JSON (de)serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Malformed input at {path}: {message}")]
    MalformedInput { path: String, message: String },

    #[error("Unsupported shape at {path}: {construct}")]
    UnsupportedShape { path: String, construct: String },
}

impl ConvertError {
    pub(crate) fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConvertError::MalformedInput {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn unsupported(path: impl Into<String>, construct: impl Into<String>) -> Self {
        ConvertError::UnsupportedShape {
            path: path.into(),
            construct: construct.into(),
        }
    }

    /// Returns the stable error code for this error variant.
    ///
    /// JSON syntax errors are reported as `MalformedInput`: from the caller's
    /// point of view there is no difference between unparseable text and a
    /// document missing its identifier.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ConvertError::JsonError(_) => ErrorCode::MalformedInput,
            ConvertError::MalformedInput { .. } => ErrorCode::MalformedInput,
            ConvertError::UnsupportedShape { .. } => ErrorCode::UnsupportedShape,
        }
    }

    /// Returns the JSON Pointer fragment (`#/items/0`) into the input document, if available.
    pub fn path(&self) -> Option<&str> {
        match self {
            ConvertError::JsonError(_) => None,
            ConvertError::MalformedInput { path, .. } => Some(path),
            ConvertError::UnsupportedShape { path, .. } => Some(path),
        }
    }

    /// Produces a structured JSON error.
    ///
    /// Format: `{"code": "...", "message": "...", "path": "..." | null}`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
            "path": self.path(),
        })
    }
}
