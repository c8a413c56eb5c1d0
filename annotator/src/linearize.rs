//! Span linearizer: plain text + annotations → marked text.
//!
//! Every offset contributes two endpoints. Endpoints are ordered right to left so that
//! inserting a marker never shifts a position that is still to be processed; within one
//! position the order decides how coincident boundaries nest.

use std::collections::HashMap;

use crate::annotations::Annotations;
use crate::error::AnnotateError;
use crate::mapping::Mapping;
use crate::offsets::char_boundaries;
use crate::text_edit::{TextEdit, apply_text_edits};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Endpoint<'m> {
    offset: usize,
    marker: &'m str,
}

/// Renders `annotations` into `text` as inline markers.
///
/// Keys may be labels or markers of `mapping`, mixed freely. At a position shared by several
/// boundaries, the marker closing the span that was entered last comes first, so spans nest
/// instead of interleaving.
pub fn to_marked_text(
    mapping: &Mapping,
    text: &str,
    annotations: &Annotations,
) -> Result<String, AnnotateError> {
    if annotations.is_empty() {
        return Ok(text.to_string());
    }

    let boundaries = char_boundaries(text);
    let text_len = boundaries.len() - 1;

    let mut endpoints = Vec::new();
    for (key, offsets) in annotations.iter() {
        let marker = mapping.resolve_key(key)?;
        for &offset in offsets {
            if offset.start > offset.end || offset.end > text_len {
                return Err(AnnotateError::InvalidOffset {
                    key: key.to_string(),
                    offset,
                    text_len,
                });
            }
            endpoints.push(Endpoint {
                offset: offset.start,
                marker,
            });
            endpoints.push(Endpoint {
                offset: offset.end,
                marker,
            });
        }
    }

    let plan = insertion_order(endpoints);
    tracing::debug!(
        chars = text_len,
        keys = annotations.len(),
        endpoints = plan.len(),
        "rendering marked text"
    );

    // The plan runs right to left; edits are expected in document order.
    let edits: Vec<TextEdit> = plan
        .iter()
        .rev()
        .map(|endpoint| TextEdit::insert(boundaries[endpoint.offset], endpoint.marker))
        .collect();

    Ok(apply_text_edits(text, &edits))
}

/// Orders endpoints for right-to-left insertion.
///
/// Primary key: offset, descending. Secondary key: the marker's rank in tag order (first
/// appearance when scanning endpoints left to right), descending. Then one adjacent swap per
/// collision: when the next two endpoints share an offset and the second carries the marker
/// inserted just before them, that marker closes the span whose other end was just placed, so
/// it is inserted first and ends up innermost.
fn insertion_order(mut endpoints: Vec<Endpoint<'_>>) -> Vec<Endpoint<'_>> {
    endpoints.sort_by_key(|endpoint| endpoint.offset);

    let mut rank: HashMap<&str, usize> = HashMap::new();
    for endpoint in &endpoints {
        let next = rank.len();
        rank.entry(endpoint.marker).or_insert(next);
    }

    endpoints.sort_by(|a, b| {
        (b.offset, rank[b.marker]).cmp(&(a.offset, rank[a.marker]))
    });

    let mut ordered = Vec::with_capacity(endpoints.len());
    let mut last_marker: Option<&str> = None;
    let mut i = 0;
    while i < endpoints.len() {
        let current = endpoints[i];
        match endpoints.get(i + 1) {
            Some(&next) if next.offset == current.offset && last_marker == Some(next.marker) => {
                tracing::trace!(
                    offset = current.offset,
                    closing = next.marker,
                    opening = current.marker,
                    "coincident boundaries: closing marker placed first"
                );
                ordered.push(next);
                ordered.push(current);
                last_marker = Some(next.marker);
                i += 2;
            }
            _ => {
                ordered.push(current);
                last_marker = Some(current.marker);
                i += 1;
            }
        }
    }
    ordered
}
