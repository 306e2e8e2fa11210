//! Search errors.

use ramanujan_dispatch::EvaluationError;
use ramanujan_store::{BucketKey, StoreError};
use thiserror::Error;

/// Errors that abort a search or a report.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Replaying a stored record did not reproduce its value.
    #[error("replay of {key} gave {actual}, stored value is {expected}")]
    ReplayMismatch {
        /// Bucket holding the record.
        key: BucketKey,
        /// The stored value.
        expected: String,
        /// The replayed value.
        actual: String,
    },

    /// Replaying a stored record failed outright.
    #[error("replay of {key} failed: {source}")]
    Replay {
        /// Bucket holding the record.
        key: BucketKey,
        /// Why evaluation failed.
        source: EvaluationError,
    },

    /// The bucket store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The report could not be written.
    #[error("report: {0}")]
    Io(#[from] std::io::Error),
}
