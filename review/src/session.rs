use std::ops::Range;

use annotator::{
    Annotations, KeyKind, Mapping, TextEdit, apply_text_edits, from_marked_text, strip_markers,
};
use serde::Serialize;

use crate::error::ReviewError;
use crate::input::decode_input;
use crate::stops::insertion_stops;

/// Stands in for the selected marker while it is being moved.
pub const ACTIVE_MARKER: &str = "🔻";

/// Where the review loop is.
///
/// `index` is the 0-based occurrence of a marker in the current text, counted left to right.
/// `target` is the byte offset in the current text where that marker would be re-inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReviewState {
    Idle,
    AnnotationSelected { index: usize },
    AwaitingConfirmation { index: usize, target: usize },
    Done { correct: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewEvent {
    /// Drop any selection and show the text again.
    Redisplay,
    /// Select the marker occurrence with this 0-based index.
    Select(usize),
    /// Move the selection this many stops; negative moves left.
    Move(isize),
    /// Apply the pending move.
    Confirm,
    /// Remove every marker of the mapping.
    DeleteAll,
    Accept,
    Reject,
}

/// Result of a finished review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewOutcome {
    pub marked_text: String,
    pub plain_text: String,
    pub annotations: Annotations,
    pub correct: bool,
}

pub struct ReviewSession<'m> {
    mapping: &'m Mapping,
    text: String,
    state: ReviewState,
    active_marker: String,
}

impl<'m> ReviewSession<'m> {
    pub fn new(mapping: &'m Mapping, marked_text: impl Into<String>) -> Self {
        Self {
            mapping,
            text: marked_text.into(),
            state: ReviewState::Idle,
            active_marker: ACTIVE_MARKER.to_string(),
        }
    }

    pub fn with_active_marker(mut self, marker: impl Into<String>) -> Self {
        self.active_marker = marker.into();
        self
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    /// The current marked text, without any selection preview.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn marker_count(&self) -> usize {
        self.mapping.scanner().count(&self.text)
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, ReviewState::Done { .. })
    }

    pub fn handle(&mut self, event: ReviewEvent) -> Result<ReviewState, ReviewError> {
        let next = self.transition(event)?;
        tracing::debug!(?event, from = ?self.state, to = ?next, "review transition");
        self.state = next;
        Ok(next)
    }

    /// Decodes one raw input line against the current state and handles it.
    pub fn handle_input(&mut self, line: &str) -> Result<ReviewState, ReviewError> {
        match decode_input(line, self.state, self.marker_count()) {
            Some(event) => self.handle(event),
            None => {
                tracing::warn!(input = line, "unrecognized review input");
                Err(ReviewError::UnrecognizedInput {
                    input: line.to_string(),
                })
            }
        }
    }

    /// The text to show for the current state.
    ///
    /// A selected marker is replaced by the active marker; a pending move shows the active
    /// marker at the target instead of the selected one.
    pub fn view(&self) -> String {
        let preview = match self.state {
            ReviewState::AnnotationSelected { index } => self.occurrence(index).map(|range| {
                apply_text_edits(&self.text, &[TextEdit::replace(range, &self.active_marker)])
            }),
            ReviewState::AwaitingConfirmation { index, target } => {
                self.relocated(index, target, &self.active_marker)
            }
            ReviewState::Idle | ReviewState::Done { .. } => return self.text.clone(),
        };
        preview.unwrap_or_else(|_| self.text.clone())
    }

    /// Parses the reviewed text once the session is done.
    pub fn finish(self) -> Result<ReviewOutcome, ReviewError> {
        let ReviewState::Done { correct } = self.state else {
            return Err(ReviewError::NotDone);
        };
        let parsed = from_marked_text(self.mapping, &self.text, KeyKind::Label)?;
        Ok(ReviewOutcome {
            marked_text: self.text,
            plain_text: parsed.plain_text,
            annotations: parsed.annotations,
            correct,
        })
    }

    fn transition(&mut self, event: ReviewEvent) -> Result<ReviewState, ReviewError> {
        use ReviewEvent::*;
        use ReviewState::*;

        match (self.state, event) {
            (state @ Done { .. }, event) => Err(ReviewError::InvalidTransition { state, event }),
            (_, Redisplay) => Ok(Idle),
            (_, Select(index)) => {
                self.occurrence(index)?;
                Ok(AnnotationSelected { index })
            }
            (AnnotationSelected { index }, Move(delta)) => {
                let origin = self.occurrence(index)?.start;
                let target = self.step(index, origin, delta)?;
                Ok(AwaitingConfirmation { index, target })
            }
            (AwaitingConfirmation { index, target }, Move(delta)) => {
                let target = self.step(index, target, delta)?;
                Ok(AwaitingConfirmation { index, target })
            }
            (Idle, Move(_)) => Err(ReviewError::NoSelection),
            (AwaitingConfirmation { index, target }, Confirm) => {
                let marker = self.occurrence(index).map(|range| self.text[range].to_string())?;
                self.text = self.relocated(index, target, &marker)?;
                Ok(Idle)
            }
            (_, Confirm) => Ok(Idle),
            (_, DeleteAll) => {
                self.text = strip_markers(self.mapping, &self.text);
                Ok(Idle)
            }
            (_, Accept) => Ok(Done { correct: true }),
            (_, Reject) => Ok(Done { correct: false }),
        }
    }

    fn markers(&self) -> Vec<Range<usize>> {
        self.mapping
            .scanner()
            .find_iter(&self.text)
            .map(|m| m.range)
            .collect()
    }

    fn occurrence(&self, index: usize) -> Result<Range<usize>, ReviewError> {
        let markers = self.markers();
        let count = markers.len();
        markers
            .into_iter()
            .nth(index)
            .ok_or(ReviewError::SelectionOutOfRange { index, count })
    }

    /// Moves `from` by `delta` stops, clamped to the first and last stop.
    fn step(&self, index: usize, from: usize, delta: isize) -> Result<usize, ReviewError> {
        let markers = self.markers();
        let selected = markers
            .get(index)
            .cloned()
            .ok_or(ReviewError::SelectionOutOfRange {
                index,
                count: markers.len(),
            })?;
        let stops = insertion_stops(&self.text, &markers, &selected);
        let pos = stops.binary_search(&from).unwrap_or_else(|i| i);
        let next = if delta < 0 {
            pos.saturating_sub(delta.unsigned_abs())
        } else {
            pos.saturating_add(delta.unsigned_abs())
        };
        Ok(stops[next.min(stops.len() - 1)])
    }

    /// The text with occurrence `index` removed and `marker` inserted at `target`.
    fn relocated(&self, index: usize, target: usize, marker: &str) -> Result<String, ReviewError> {
        let range = self.occurrence(index)?;
        let edits = if target <= range.start {
            [TextEdit::insert(target, marker), TextEdit::delete(range)]
        } else {
            [TextEdit::delete(range), TextEdit::insert(target, marker)]
        };
        Ok(apply_text_edits(&self.text, &edits))
    }
}
