use annotator::AnnotateError;
use thiserror::Error;

use crate::session::{ReviewEvent, ReviewState};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("{event:?} is not accepted in state {state:?}")]
    InvalidTransition {
        state: ReviewState,
        event: ReviewEvent,
    },

    #[error("marker #{} selected, but the text has {count} markers", .index + 1)]
    SelectionOutOfRange { index: usize, count: usize },

    #[error("no marker selected")]
    NoSelection,

    #[error("review is not finished")]
    NotDone,

    #[error("unrecognized input {input:?}")]
    UnrecognizedInput { input: String },

    #[error(transparent)]
    Annotate(#[from] AnnotateError),
}
