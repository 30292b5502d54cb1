//! Typed views of the Presentation API documents on either side of the
//! conversion.
//!
//! [`v3`] holds the subset of Presentation 3 the parser understands and
//! [`v2`] the Presentation 2 shape the mapper emits. Both are plain values;
//! validation happens in [`crate::parser`].

pub mod language;
pub mod v2;
pub mod v3;

pub use language::LanguageMap;
