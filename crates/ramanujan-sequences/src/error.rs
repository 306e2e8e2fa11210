//! Sequence specification errors.

use thiserror::Error;

/// Errors from building or indexing a sequence.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// A coefficient range `[start, end)` with `end <= start`.
    #[error("empty coefficient range [{start}, {end})")]
    EmptyRange {
        /// Inclusive lower bound.
        start: i64,
        /// Exclusive upper bound.
        end: i64,
    },

    /// A digit generator with no digits to draw from.
    #[error("digit alphabet is empty")]
    EmptyAlphabet,

    /// A polynomial generator with no coefficient groups.
    #[error("no coefficient groups given")]
    NoCoefficients,

    /// The sequence has more elements than can be indexed.
    #[error("sequence is too large to index")]
    TooLarge,

    /// An index past the end of the sequence.
    #[error("index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: u64,
        /// The sequence length.
        len: u64,
    },
}
