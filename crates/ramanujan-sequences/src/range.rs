//! Half-open integer coefficient ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::SequenceError;

/// The integers `start..end`, written `[start, end]` in configuration files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[i64; 2]", into = "[i64; 2]")]
pub struct CoefficientRange {
    start: i64,
    end: i64,
}

impl CoefficientRange {
    /// Creates the range `start..end`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyRange`] if `end <= start`.
    pub fn new(start: i64, end: i64) -> Result<Self, SequenceError> {
        if end <= start {
            return Err(SequenceError::EmptyRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Inclusive lower bound.
    #[must_use]
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Exclusive upper bound.
    #[must_use]
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Number of integers in the range.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end.abs_diff(self.start)
    }

    /// Always false; empty ranges cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the `offset`-th integer of the range.
    #[must_use]
    pub fn nth(&self, offset: u64) -> i64 {
        self.start.wrapping_add_unsigned(offset)
    }
}

impl TryFrom<[i64; 2]> for CoefficientRange {
    type Error = SequenceError;

    fn try_from([start, end]: [i64; 2]) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

impl From<CoefficientRange> for [i64; 2] {
    fn from(range: CoefficientRange) -> Self {
        [range.start, range.end]
    }
}

impl fmt::Display for CoefficientRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
