//! Queue, evaluation and dispatch errors.

use ramanujan_algorithms::AlgorithmError;
use ramanujan_postproc::TransformError;
use ramanujan_sequences::SequenceError;
use ramanujan_store::{RetryError, Retryable, StoreError};
use thiserror::Error;

/// Errors reported by a work queue.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The queue is unreachable for now.
    #[error("transient queue failure: {0}")]
    Transient(String),

    /// The queue rejected the job for good.
    #[error("queue failure: {0}")]
    Fatal(String),
}

impl Retryable for QueueError {
    fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Why a single argument pair could not be evaluated.
///
/// These skip one pair; the batch carries on.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// The pair index or a sequence argument was invalid.
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// The algorithm rejected its arguments.
    #[error(transparent)]
    Algorithm(#[from] AlgorithmError),

    /// The transform is not registered.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Errors that abort a batch or a dispatch run.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The queue failed permanently.
    #[error(transparent)]
    Queue(QueueError),

    /// Enqueueing kept failing transiently.
    #[error("enqueue still failing after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Attempts made, including the first.
        attempts: u32,
        /// The last failure seen.
        last: QueueError,
    },

    /// The bucket store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The generation plan is invalid.
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// The worker pool could not be built.
    #[error("worker pool: {0}")]
    Pool(String),
}

impl From<RetryError<QueueError>> for DispatchError {
    fn from(err: RetryError<QueueError>) -> Self {
        match err {
            RetryError::Fatal(e) => Self::Queue(e),
            RetryError::Exhausted { attempts, last } => Self::RetriesExhausted { attempts, last },
        }
    }
}
