//! Char/byte offset conversion.
//!
//! Annotation offsets count chars; slicing and edits need UTF-8 byte offsets.

/// Byte offset of the `chars`-th char. Offsets past the end clamp to `source.len()`.
pub fn char_offset_to_byte(source: &str, chars: usize) -> usize {
    if chars == 0 {
        return 0;
    }

    source
        .char_indices()
        .nth(chars)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(source.len())
}

/// Number of chars before `byte`. A byte inside a char counts that char as not yet reached.
pub fn byte_offset_to_char(source: &str, byte: usize) -> usize {
    source
        .char_indices()
        .take_while(|(byte_idx, _)| *byte_idx < byte)
        .count()
}

/// Byte offset of every char boundary, including `source.len()`.
///
/// `boundaries[n]` is the byte offset of char offset `n`; the table has `char_len + 1` entries.
pub fn char_boundaries(source: &str) -> Vec<usize> {
    source
        .char_indices()
        .map(|(byte_idx, _)| byte_idx)
        .chain(std::iter::once(source.len()))
        .collect()
}
