//! Apply byte-offset text edits.
//!
//! Edits are applied from back to front, so every edit's range stays valid in the coordinates
//! of the original source.

use std::ops::Range;

/// A single text edit in byte offsets. An empty `range` is a pure insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub new_text: String,
}

impl TextEdit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            range: at..at,
            new_text: text.into(),
        }
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self {
            range,
            new_text: String::new(),
        }
    }

    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: text.into(),
        }
    }
}

/// Applies byte-offset text edits to `source`.
///
/// The caller must provide non-overlapping edits in document order. Insertions sharing a
/// position end up in the order given. Edits out of bounds or off a UTF-8 char boundary are
/// skipped.
pub fn apply_text_edits(source: &str, edits: &[TextEdit]) -> String {
    let inserted: usize = edits.iter().map(|edit| edit.new_text.len()).sum();
    let mut updated = String::with_capacity(source.len() + inserted);
    updated.push_str(source);

    for edit in edits.iter().rev() {
        let Range { start, end } = edit.range;
        if start > end || end > source.len() {
            tracing::warn!(start, end, len = source.len(), "skipping out-of-bounds edit");
            continue;
        }
        if !source.is_char_boundary(start) || !source.is_char_boundary(end) {
            tracing::warn!(start, end, "skipping edit off a char boundary");
            continue;
        }

        updated.replace_range(start..end, &edit.new_text);
    }

    updated
}
