//! Marker alphabet: the set of strings a mapping may use as markers.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::LoadError;

const BUNDLED_MARKERS: &str = include_str!("../resources/markers.txt");

/// Membership test for marker candidates.
pub trait MarkerAlphabet {
    fn is_marker(&self, candidate: &str) -> bool;
}

impl<F> MarkerAlphabet for F
where
    F: Fn(&str) -> bool,
{
    fn is_marker(&self, candidate: &str) -> bool {
        self(candidate)
    }
}

/// Set-backed alphabet, read from a comma-separated list (`🍏,🍊,🌶️`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerSet {
    markers: HashSet<String>,
}

impl MarkerSet {
    /// Parses a comma-separated list. Blank items are skipped.
    pub fn parse(list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let list = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::parse(&list);
        tracing::debug!(path = %path.display(), markers = set.len(), "loaded marker alphabet");
        Ok(set)
    }

    /// Small alphabet shipped with the crate; covers the bundled default mapping.
    pub fn bundled() -> Self {
        Self::parse(BUNDLED_MARKERS)
    }

    pub fn insert(&mut self, marker: impl Into<String>) -> bool {
        self.markers.insert(marker.into())
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.markers.contains(candidate)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for MarkerSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            markers: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl MarkerAlphabet for MarkerSet {
    fn is_marker(&self, candidate: &str) -> bool {
        self.contains(candidate)
    }
}
