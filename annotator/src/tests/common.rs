use crate::{Annotations, Mapping, MarkerSet, Offset};

/// Single uppercase ASCII letters as markers: `E`, `P`, `Q`, `U`.
pub fn letters() -> Mapping {
    Mapping::new(
        [
            ("entity", "E"),
            ("property", "P"),
            ("quantity", "Q"),
            ("unit", "U"),
        ],
        |s: &str| s.len() == 1 && s.chars().all(|c| c.is_ascii_uppercase()),
    )
    .unwrap()
}

/// The emoji mapping used throughout the docs.
pub fn emoji() -> Mapping {
    Mapping::new(
        [
            ("entity", "🌶️"),
            ("property", "🍊"),
            ("quantity", "🍏"),
            ("unit", "🍓"),
            ("temporal_scope", "📆"),
        ],
        MarkerSet::bundled(),
    )
    .unwrap()
}

pub fn ann<const N: usize>(entries: [(&str, &[(usize, usize)]); N]) -> Annotations {
    entries
        .into_iter()
        .map(|(key, offsets)| {
            let offsets = offsets.iter().copied().map(Offset::from).collect();
            (key, offsets)
        })
        .collect()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_ann_builds_in_order() {
    let a = ann([("b", &[(1, 2)]), ("a", &[(0, 1), (3, 4)])]);
    assert_eq!(a.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(a.get("a"), Some(&[Offset::new(0, 1), Offset::new(3, 4)][..]));
}
