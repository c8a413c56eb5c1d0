//! Raw input lines → review events.

use crate::session::{ReviewEvent, ReviewState};

const RIGHT_ARROW: &str = "\x1b[C";
const LEFT_ARROW: &str = "\x1b[D";

/// Decodes one input line.
///
/// * empty line: confirm a pending move, otherwise redisplay
/// * `1`..=`marker_count`: select that marker (1-based)
/// * a run of right or left arrow escape sequences: move that many stops
/// * `d`: delete all markers; `y` / `n`: accept / reject
///
/// Anything else is `None`.
pub fn decode_input(line: &str, state: ReviewState, marker_count: usize) -> Option<ReviewEvent> {
    match line {
        "" => Some(match state {
            ReviewState::AwaitingConfirmation { .. } => ReviewEvent::Confirm,
            _ => ReviewEvent::Redisplay,
        }),
        "y" => Some(ReviewEvent::Accept),
        "n" => Some(ReviewEvent::Reject),
        "d" => Some(ReviewEvent::DeleteAll),
        _ if line.bytes().all(|b| b.is_ascii_digit()) => {
            let n: usize = line.parse().ok()?;
            (1..=marker_count)
                .contains(&n)
                .then(|| ReviewEvent::Select(n - 1))
        }
        _ => match (repeated(line, RIGHT_ARROW), repeated(line, LEFT_ARROW)) {
            (Some(n), _) => isize::try_from(n).ok().map(ReviewEvent::Move),
            (_, Some(n)) => isize::try_from(n).ok().map(|n| ReviewEvent::Move(-n)),
            (None, None) => None,
        },
    }
}

fn repeated(line: &str, unit: &str) -> Option<usize> {
    let n = line.len() / unit.len();
    (line.len() % unit.len() == 0 && line == unit.repeat(n)).then_some(n)
}
