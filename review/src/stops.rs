use std::ops::Range;

use annotator::char_boundaries;

/// Byte positions where the selected marker may be re-inserted.
///
/// Every char boundary of `text`, except positions strictly inside another marker and positions
/// inside or at the end of the selected marker, whose start already stands for that gap.
/// Always contains `0` and the selected marker's start.
pub(crate) fn insertion_stops(
    text: &str,
    markers: &[Range<usize>],
    selected: &Range<usize>,
) -> Vec<usize> {
    char_boundaries(text)
        .into_iter()
        .filter(|&pos| !(selected.start < pos && pos <= selected.end))
        .filter(|&pos| !markers.iter().any(|m| m.start < pos && pos < m.end))
        .collect()
}
