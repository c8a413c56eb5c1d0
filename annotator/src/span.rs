use std::fmt;

use serde::{Deserialize, Serialize};

/// Half-open char span into a plain text: `[start, end)`.
///
/// Positions count Unicode scalar values, not bytes. Serialized as `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Offset {
    pub start: usize,
    pub end: usize,
}

impl Offset {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }
}

impl From<(usize, usize)> for Offset {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

impl From<Offset> for (usize, usize) {
    fn from(offset: Offset) -> Self {
        (offset.start, offset.end)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
