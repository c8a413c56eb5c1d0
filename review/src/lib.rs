//! Review loop for marked text.
//!
//! A reviewer inspects marked text, moves single marker occurrences, clears all markers, and
//! finally accepts or rejects the example. The loop is an explicit state machine driven by
//! discrete events; printing and reading the terminal stay with the caller.
//!
//! Coordinates are UTF-8 byte offsets into the current marked text, matching `annotator`'s
//! text edits.

mod error;
mod input;
mod session;
mod stops;

pub use error::ReviewError;
pub use input::decode_input;
pub use session::{ACTIVE_MARKER, ReviewEvent, ReviewOutcome, ReviewSession, ReviewState};
