use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use crate::tests::common::{emoji, letters};
use crate::{Annotations, KeyKind, Mapping, Offset, from_marked_text, to_marked_text};

const LETTER_TEXT: &[char] = &['a', 'b', ' ', 'é', '.'];
const EMOJI_TEXT: &[char] = &['x', '一', ' ', 'ß', '\n'];

/// Sorted, non-overlapping offsets: the shape a round trip preserves.
///
/// Equal cuts give zero-length spans and adjacent spans sharing a boundary.
fn offsets_strategy(text_len: usize) -> impl Strategy<Value = Vec<Offset>> {
    prop::collection::vec((0..=text_len, 0..=text_len), 1..=3usize).prop_map(|pairs| {
        let mut cuts: Vec<usize> = pairs.into_iter().flat_map(|(a, b)| [a, b]).collect();
        cuts.sort_unstable();
        cuts.chunks_exact(2)
            .map(|pair| Offset::new(pair[0], pair[1]))
            .collect()
    })
}

/// A text over `alphabet` plus annotations for a random subset of the mapping's labels.
fn case_strategy(
    alphabet: &'static [char],
    mapping: Mapping,
    max_len: usize,
) -> impl Strategy<Value = (String, Annotations)> {
    let labels: Vec<String> = mapping.labels().map(str::to_string).collect();
    prop::collection::vec(prop::sample::select(alphabet), 0..max_len)
        .prop_map(|chars| chars.into_iter().collect::<String>())
        .prop_flat_map(move |text| {
            let len = text.chars().count();
            let entries: Vec<_> = labels
                .iter()
                .map(|label| {
                    (
                        Just(label.clone()),
                        prop::option::weighted(0.7, offsets_strategy(len)),
                    )
                })
                .collect();
            (Just(text), entries)
        })
        .prop_map(|(text, entries)| {
            let annotations: Annotations = entries
                .into_iter()
                .filter_map(|(label, offsets)| offsets.map(|offsets| (label, offsets)))
                .collect();
            (text, annotations)
        })
}

fn assert_round_trip(
    mapping: &Mapping,
    text: &str,
    annotations: &Annotations,
) -> Result<(), TestCaseError> {
    let marked = to_marked_text(mapping, text, annotations).unwrap();
    let parsed = from_marked_text(mapping, &marked, KeyKind::Label).unwrap();
    prop_assert_eq!(&parsed.plain_text, text, "marked: {}", marked);
    prop_assert_eq!(&parsed.annotations, annotations, "marked: {}", marked);

    let spans: usize = annotations.iter().map(|(_, offsets)| offsets.len()).sum();
    prop_assert_eq!(mapping.scanner().count(&marked), spans * 2, "marked: {}", marked);
    prop_assert_eq!(&mapping.scanner().strip(&parsed.plain_text), &parsed.plain_text);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_round_trip_letters((text, annotations) in case_strategy(LETTER_TEXT, letters(), 24)) {
        assert_round_trip(&letters(), &text, &annotations)?;
    }

    #[test]
    fn test_round_trip_emoji((text, annotations) in case_strategy(EMOJI_TEXT, emoji(), 24)) {
        assert_round_trip(&emoji(), &text, &annotations)?;
    }

    // Short texts make boundaries shared across labels the common case.
    #[test]
    fn test_round_trip_crowded_boundaries((text, annotations) in case_strategy(LETTER_TEXT, emoji(), 4)) {
        assert_round_trip(&emoji(), &text, &annotations)?;
    }
}

#[test]
fn test_round_trip_coincident_ends() {
    // Shared end positions render interleaved, yet every offset survives.
    let mapping = emoji();
    let annotations: Annotations = [
        ("property", vec![Offset::new(0, 12)]),
        ("entity", vec![Offset::new(8, 12)]),
    ]
    .into();
    let marked = to_marked_text(&mapping, "surface area", &annotations).unwrap();
    assert_eq!(marked, "🍊surface 🌶️area🍊🌶️");
    assert_round_trip(&mapping, "surface area", &annotations).unwrap();
}

#[test]
fn test_close_precedes_open_for_any_key_order() {
    let mapping = letters();
    let text = "abcdefghijklmnop";
    let labels = ["entity", "property", "quantity", "unit"];
    for (i, first) in labels.iter().enumerate() {
        for second in labels.iter().skip(i + 1) {
            for boundary in 1..text.len() - 1 {
                let forward: Annotations = [
                    (*first, vec![Offset::new(0, boundary)]),
                    (*second, vec![Offset::new(boundary, text.len())]),
                ]
                .into();
                let backward: Annotations = [
                    (*second, vec![Offset::new(boundary, text.len())]),
                    (*first, vec![Offset::new(0, boundary)]),
                ]
                .into();

                let closing = mapping.get(first).unwrap();
                let opening = mapping.get(second).unwrap();
                let expected = format!(
                    "{closing}{}{closing}{opening}{}{opening}",
                    &text[..boundary],
                    &text[boundary..]
                );
                assert_eq!(to_marked_text(&mapping, text, &forward).unwrap(), expected);
                assert_eq!(to_marked_text(&mapping, text, &backward).unwrap(), expected);
            }
        }
    }
}
