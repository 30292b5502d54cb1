//! Language maps and the rule that collapses them to a single string.
//!
//! Presentation 3 labels are maps from a BCP 47 tag (or `"none"`) to a list
//! of strings. Presentation 2 labels are plain strings. Every place the
//! mapper needs a string goes through [`LanguageMap::flatten`] so the choice
//! of language is made exactly once:
//!
//! 1. the `"none"` entry, if it has a value;
//! 2. otherwise the `"en"` entry, if it has a value;
//! 3. otherwise the first entry, in document order, that has a value.
//!
//! Within the chosen entry the first string wins.

/// Tag used by Presentation 3 for values with no language.
pub const NONE_TAG: &str = "none";

/// Fallback tag preferred when no untagged value exists.
pub const DEFAULT_TAG: &str = "en";

/// An ordered mapping from language tag to an ordered list of strings.
///
/// Entries keep the order they appeared in the source document. A plain
/// `HashMap` would make rule 3 above depend on hashing, so this is a vector
/// of pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageMap {
    entries: Vec<(String, Vec<String>)>,
}

impl LanguageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding a single untagged value.
    pub fn untagged(value: impl Into<String>) -> Self {
        Self {
            entries: vec![(NONE_TAG.to_string(), vec![value.into()])],
        }
    }

    pub fn push(&mut self, tag: impl Into<String>, values: Vec<String>) {
        self.entries.push((tag.into(), values));
    }

    pub fn entries(&self) -> &[(String, Vec<String>)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values for `tag`. With duplicate tags the first occurrence wins.
    pub fn get(&self, tag: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, values)| values.as_slice())
    }

    /// Collapse the map to one string using the fixed precedence rule.
    ///
    /// Returns `None` when no entry has any value.
    pub fn flatten(&self) -> Option<&str> {
        [NONE_TAG, DEFAULT_TAG]
            .iter()
            .find_map(|tag| self.get(tag).and_then(<[String]>::first))
            .or_else(|| self.entries.iter().find_map(|(_, values)| values.first()))
            .map(String::as_str)
    }
}

impl FromIterator<(String, Vec<String>)> for LanguageMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Flatten an optional language map, yielding `""` when absent or empty.
pub fn flatten_or_empty(map: Option<&LanguageMap>) -> String {
    map.and_then(LanguageMap::flatten)
        .unwrap_or_default()
        .to_string()
}
