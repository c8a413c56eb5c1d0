//! Label ↔ marker mapping.
//!
//! Two synchronized views (label → marker, marker → label) plus the scanner for the current
//! marker set. Every mutation validates first, then re-derives the inverse view and the scanner
//! from the label view.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::alphabet::MarkerAlphabet;
use crate::error::{AnnotateError, ValidationReason};
use crate::scanner::MarkerScanner;

/// Whether two labels may share one marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    #[default]
    Reject,
    /// Legacy behavior: collisions are accepted and the last label (in label order) owns the
    /// marker when parsing.
    Allow,
}

#[derive(Clone)]
pub struct Mapping {
    by_label: BTreeMap<String, String>,
    by_marker: BTreeMap<String, String>,
    scanner: MarkerScanner,
    alphabet: Arc<dyn MarkerAlphabet + Send + Sync>,
    conflicts: ConflictPolicy,
}

impl Mapping {
    pub fn new<K, V>(
        entries: impl IntoIterator<Item = (K, V)>,
        alphabet: impl MarkerAlphabet + Send + Sync + 'static,
    ) -> Result<Self, AnnotateError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::with_policy(entries, alphabet, ConflictPolicy::default())
    }

    pub fn with_policy<K, V>(
        entries: impl IntoIterator<Item = (K, V)>,
        alphabet: impl MarkerAlphabet + Send + Sync + 'static,
        conflicts: ConflictPolicy,
    ) -> Result<Self, AnnotateError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut mapping = Self {
            by_label: BTreeMap::new(),
            by_marker: BTreeMap::new(),
            scanner: MarkerScanner::default(),
            alphabet: Arc::new(alphabet),
            conflicts,
        };

        let requested: BTreeMap<String, String> = entries
            .into_iter()
            .map(|(label, marker)| (label.into(), marker.into()))
            .collect();

        for (label, marker) in requested {
            mapping.validate(&label, &marker)?;
            mapping.by_label.insert(label, marker);
        }
        mapping.rederive();

        tracing::debug!(
            labels = mapping.len(),
            conflicts = ?mapping.conflicts,
            "built label mapping"
        );
        Ok(mapping)
    }

    /// Marker of `label`.
    pub fn get(&self, label: &str) -> Result<&str, AnnotateError> {
        self.by_label
            .get(label)
            .map(String::as_str)
            .ok_or_else(|| AnnotateError::NotFound {
                label: label.to_string(),
            })
    }

    /// Label owning `marker`, if any.
    pub fn label_for(&self, marker: &str) -> Option<&str> {
        self.by_marker.get(marker).map(String::as_str)
    }

    /// Inserts or overwrites one entry. Nothing changes if the entry is rejected.
    pub fn set(
        &mut self,
        label: impl Into<String>,
        marker: impl Into<String>,
    ) -> Result<(), AnnotateError> {
        let label = label.into();
        let marker = marker.into();
        self.validate(&label, &marker)?;

        tracing::debug!(label = %label, marker = %marker, "set mapping entry");
        self.by_label.insert(label, marker);
        self.rederive();
        Ok(())
    }

    /// Removes `label`, returning its marker.
    pub fn delete(&mut self, label: &str) -> Result<String, AnnotateError> {
        let marker = self
            .by_label
            .remove(label)
            .ok_or_else(|| AnnotateError::NotFound {
                label: label.to_string(),
            })?;

        tracing::debug!(label, marker = %marker, "deleted mapping entry");
        self.rederive();
        Ok(marker)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    pub fn contains_marker(&self, marker: &str) -> bool {
        self.by_marker.contains_key(marker)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.by_label.keys().map(String::as_str)
    }

    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.by_marker.keys().map(String::as_str)
    }

    /// `(label, marker)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_label
            .iter()
            .map(|(label, marker)| (label.as_str(), marker.as_str()))
    }

    pub fn conflict_policy(&self) -> ConflictPolicy {
        self.conflicts
    }

    /// Marker for an annotation key that is either a label or a marker.
    pub fn resolve_key(&self, key: &str) -> Result<&str, AnnotateError> {
        if let Some(marker) = self.by_label.get(key) {
            return Ok(marker.as_str());
        }
        if let Some((marker, _)) = self.by_marker.get_key_value(key) {
            return Ok(marker.as_str());
        }
        Err(AnnotateError::UnknownAnnotationKey {
            key: key.to_string(),
        })
    }

    pub fn scanner(&self) -> &MarkerScanner {
        &self.scanner
    }

    fn validate(&self, label: &str, marker: &str) -> Result<(), AnnotateError> {
        let reject = |reason| AnnotateError::Validation {
            label: label.to_string(),
            marker: marker.to_string(),
            reason,
        };

        if label.is_empty() {
            return Err(reject(ValidationReason::EmptyLabel));
        }
        if marker.is_empty() || !self.alphabet.is_marker(marker) {
            return Err(reject(ValidationReason::NotAMarker));
        }
        if self.conflicts == ConflictPolicy::Reject {
            let owner = self
                .by_label
                .iter()
                .find(|(other, used)| other.as_str() != label && used.as_str() == marker);
            if let Some((owner, _)) = owner {
                return Err(reject(ValidationReason::MarkerInUse {
                    label: owner.clone(),
                }));
            }
        }
        Ok(())
    }

    fn rederive(&mut self) {
        self.by_marker = self
            .by_label
            .iter()
            .map(|(label, marker)| (marker.clone(), label.clone()))
            .collect();
        self.scanner = MarkerScanner::new(self.by_marker.keys().map(String::as_str));
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapping")
            .field("by_label", &self.by_label)
            .field("conflicts", &self.conflicts)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mapping {")?;
        for (i, (label, marker)) in self.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{label}: {marker}")?;
        }
        if !self.is_empty() {
            f.write_str(" ")?;
        }
        f.write_str("}")
    }
}
