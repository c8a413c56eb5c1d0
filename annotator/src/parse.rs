//! Marked-text parser: marked text → plain text + annotations.

use crate::annotations::Annotations;
use crate::error::AnnotateError;
use crate::mapping::Mapping;
use crate::span::Offset;

/// How keys of parsed annotations are spelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyKind {
    #[default]
    Label,
    Marker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedText {
    pub plain_text: String,
    pub annotations: Annotations,
}

/// Recovers plain text and char offsets from marked text.
///
/// Each marker's position is its char offset in the marked text minus the chars of all
/// markers before it. Positions are paired per label strictly in encounter order:
/// `(p0, p1), (p2, p3), ...`. Keys appear in the order their label was first seen.
pub fn from_marked_text(
    mapping: &Mapping,
    marked_text: &str,
    key_kind: KeyKind,
) -> Result<ParsedText, AnnotateError> {
    let mut positions: Vec<(&str, Vec<usize>)> = Vec::new();
    let mut plain_text = String::with_capacity(marked_text.len());
    let mut consumed = 0;
    let mut last = 0;

    for m in mapping.scanner().find_iter(marked_text) {
        let label = mapping
            .label_for(m.marker)
            .ok_or_else(|| AnnotateError::UnknownMarker {
                marker: m.marker.to_string(),
            })?;

        let pos = m.char_start - consumed;
        match positions.iter_mut().find(|(l, _)| *l == label) {
            Some((_, list)) => list.push(pos),
            None => positions.push((label, vec![pos])),
        }

        consumed += m.marker.chars().count();
        plain_text.push_str(&marked_text[last..m.range.start]);
        last = m.range.end;
    }
    plain_text.push_str(&marked_text[last..]);

    let mut annotations = Annotations::new();
    for (label, list) in positions {
        if list.len() % 2 != 0 {
            return Err(AnnotateError::UnbalancedAnnotation {
                label: label.to_string(),
                text: marked_text.to_string(),
            });
        }

        let key = match key_kind {
            KeyKind::Label => label,
            KeyKind::Marker => mapping.get(label)?,
        };
        let offsets = list
            .chunks_exact(2)
            .map(|pair| Offset::new(pair[0], pair[1]))
            .collect();
        annotations.insert(key, offsets);
    }

    tracing::debug!(
        marker_chars = consumed,
        keys = annotations.len(),
        "parsed marked text"
    );

    Ok(ParsedText {
        plain_text,
        annotations,
    })
}

/// Removes every marker of `mapping` from `text`.
pub fn strip_markers(mapping: &Mapping, text: &str) -> String {
    mapping.scanner().strip(text)
}
