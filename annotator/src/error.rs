use std::path::PathBuf;

use thiserror::Error;

use crate::span::Offset;

/// Errors raised by the mapping and by both transformations.
///
/// Mapping mutations validate before writing, so an error never leaves a mapping half-updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotateError {
    #[error("invalid mapping entry `{label}` -> `{marker}`: {reason}")]
    Validation {
        label: String,
        marker: String,
        reason: ValidationReason,
    },

    #[error("label `{label}` not found in mapping")]
    NotFound { label: String },

    #[error("annotation key `{key}` is neither a label nor a marker of the mapping")]
    UnknownAnnotationKey { key: String },

    #[error("annotation `{label}` is not properly closed in `{text}`")]
    UnbalancedAnnotation { label: String, text: String },

    #[error("marker `{marker}` has no label in the mapping")]
    UnknownMarker { marker: String },

    #[error("offset {offset} of `{key}` does not fit a text of {text_len} chars")]
    InvalidOffset {
        key: String,
        offset: Offset,
        text_len: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationReason {
    #[error("label must not be empty")]
    EmptyLabel,
    #[error("value must be a single marker from the marker alphabet")]
    NotAMarker,
    #[error("labels and markers must be strings")]
    NotAString,
    #[error("marker is already used by label `{label}`")]
    MarkerInUse { label: String },
}

/// Errors raised while loading a mapping or an alphabet from disk or JSON.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid mapping JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Annotate(#[from] AnnotateError),
}
