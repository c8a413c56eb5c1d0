//! Mapping configuration.
//!
//! Two JSON shapes are accepted: a bare `{ "label": "marker", ... }` object, and a config
//! object `{ "labels": { ... }, "conflicts": "reject" | "allow" }`.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::alphabet::{MarkerAlphabet, MarkerSet};
use crate::error::{AnnotateError, LoadError, ValidationReason};
use crate::mapping::{ConflictPolicy, Mapping};

const BUNDLED_MAPPING: &str = include_str!("../resources/default_mapping.json");

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MappingConfig {
    pub labels: Map<String, Value>,
    #[serde(default)]
    pub conflicts: ConflictPolicy,
}

impl MappingConfig {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::from_json_str(&read(path.as_ref())?)
    }
}

impl Mapping {
    pub fn from_config(
        config: &MappingConfig,
        alphabet: impl MarkerAlphabet + Send + Sync + 'static,
    ) -> Result<Self, LoadError> {
        let entries = string_entries(&config.labels)?;
        Ok(Self::with_policy(entries, alphabet, config.conflicts)?)
    }

    /// Builds a mapping from a bare label → marker JSON object.
    pub fn from_json_str(
        json: &str,
        alphabet: impl MarkerAlphabet + Send + Sync + 'static,
    ) -> Result<Self, LoadError> {
        let labels: Map<String, Value> = serde_json::from_str(json)?;
        Ok(Self::new(string_entries(&labels)?, alphabet)?)
    }

    pub fn from_json_file(
        path: impl AsRef<Path>,
        alphabet: impl MarkerAlphabet + Send + Sync + 'static,
    ) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let mapping = Self::from_json_str(&read(path)?, alphabet)?;
        tracing::debug!(path = %path.display(), labels = mapping.len(), "loaded mapping");
        Ok(mapping)
    }

    /// The default mapping shipped with the crate, validated against [`MarkerSet::bundled`].
    pub fn bundled() -> Result<Self, LoadError> {
        Self::from_json_str(BUNDLED_MAPPING, MarkerSet::bundled())
    }
}

fn string_entries(labels: &Map<String, Value>) -> Result<Vec<(String, String)>, AnnotateError> {
    labels
        .iter()
        .map(|(label, value)| match value {
            Value::String(marker) => Ok((label.clone(), marker.clone())),
            other => Err(AnnotateError::Validation {
                label: label.clone(),
                marker: other.to_string(),
                reason: ValidationReason::NotAString,
            }),
        })
        .collect()
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
