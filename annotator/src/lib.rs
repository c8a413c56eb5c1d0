//! Inline marker annotations.
//!
//! Converts between plain text plus `label → [offsets]` and marked text, where every span
//! boundary carries its label's marker in place: `🌶️Andalusia🌶️ has a 🍊surface area🍊`.
//! All offsets are char positions into the plain text, using `[start, end)`.
//!
//! Pipeline: `Mapping` (label ↔ marker, validated against a `MarkerAlphabet`) →
//! `to_marked_text` / `from_marked_text`, which are exact inverses for well-formed input.

mod alphabet;
mod annotations;
mod config;
mod error;
mod linearize;
mod mapping;
mod offsets;
mod parse;
mod scanner;
mod span;
mod tests;
mod text_edit;

pub use alphabet::{MarkerAlphabet, MarkerSet};
pub use annotations::Annotations;
pub use config::MappingConfig;
pub use error::{AnnotateError, LoadError, ValidationReason};
pub use linearize::to_marked_text;
pub use mapping::{ConflictPolicy, Mapping};
pub use offsets::{byte_offset_to_char, char_boundaries, char_offset_to_byte};
pub use parse::{KeyKind, ParsedText, from_marked_text, strip_markers};
pub use scanner::{MarkerMatch, MarkerMatches, MarkerScanner};
pub use span::Offset;
pub use text_edit::{TextEdit, apply_text_edits};
