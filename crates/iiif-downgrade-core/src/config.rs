//! Configuration for manifest conversion.

use serde::{Deserialize, Serialize};

/// Options for manifest conversion.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `manifest-id`). This naming
/// convention is part of the public API contract for config files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConvertOptions {
    /// Identifier to publish the v2 manifest under, replacing the source
    /// manifest's `id`. The sequence identifier is derived from whichever
    /// identifier ends up on the output.
    pub manifest_id: Option<String>,
}

impl ConvertOptions {
    /// Options that republish the manifest under `id`.
    pub fn with_manifest_id(id: impl Into<String>) -> Self {
        Self {
            manifest_id: Some(id.into()),
        }
    }
}
