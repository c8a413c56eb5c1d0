use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::span::Offset;

/// Label (or marker) → ordered offsets, in key insertion order.
///
/// Equality ignores key order but not the order of offsets within a key.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    entries: Vec<(String, Vec<Offset>)>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the offsets of `key`, returning the previous ones.
    pub fn insert(&mut self, key: impl Into<String>, offsets: Vec<Offset>) -> Option<Vec<Offset>> {
        let key = key.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, offsets)),
            None => {
                self.entries.push((key, offsets));
                None
            }
        }
    }

    /// Appends one offset to `key`.
    pub fn push(&mut self, key: &str, offset: Offset) {
        match self.position(key) {
            Some(idx) => self.entries[idx].1.push(offset),
            None => self.entries.push((key.to_string(), vec![offset])),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[Offset]> {
        self.position(key).map(|idx| self.entries[idx].1.as_slice())
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<Offset>> {
        self.position(key).map(|idx| self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Offset])> {
        self.entries
            .iter()
            .map(|(key, offsets)| (key.as_str(), offsets.as_slice()))
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl PartialEq for Annotations {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, offsets)| other.get(key) == Some(offsets))
    }
}

impl Eq for Annotations {}

impl<K: Into<String>> FromIterator<(K, Vec<Offset>)> for Annotations {
    fn from_iter<I: IntoIterator<Item = (K, Vec<Offset>)>>(iter: I) -> Self {
        let mut annotations = Annotations::new();
        for (key, offsets) in iter {
            annotations.insert(key, offsets);
        }
        annotations
    }
}

impl<K: Into<String>, const N: usize> From<[(K, Vec<Offset>); N]> for Annotations {
    fn from(entries: [(K, Vec<Offset>); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl Serialize for Annotations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, offsets) in self.iter() {
            map.serialize_entry(key, offsets)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Annotations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AnnotationsVisitor;

        impl<'de> Visitor<'de> for AnnotationsVisitor {
            type Value = Annotations;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of label to a list of [start, end] pairs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut annotations = Annotations::new();
                while let Some((key, offsets)) = access.next_entry::<String, Vec<Offset>>()? {
                    annotations.insert(key, offsets);
                }
                Ok(annotations)
            }
        }

        deserializer.deserialize_map(AnnotationsVisitor)
    }
}
