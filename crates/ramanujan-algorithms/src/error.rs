//! Evaluation and registration errors.

use thiserror::Error;

use crate::AlgorithmId;

/// Errors raised by a single algorithm evaluation.
///
/// These fail one coefficient pair; callers skip the pair and continue.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AlgorithmError {
    /// The argument lists have a length the algorithm cannot interpret.
    #[error("{algorithm} expects {expected} value(s) per side, got a: {a}, b: {b}")]
    InvalidArity {
        /// The algorithm that rejected its input.
        algorithm: AlgorithmId,
        /// The required list length.
        expected: usize,
        /// Length of the `a` list.
        a: usize,
        /// Length of the `b` list.
        b: usize,
    },

    /// The `a` and `b` lists violate the algorithm's length contract.
    #[error("{algorithm}: mismatched argument lengths a: {a}, b: {b}")]
    LengthMismatch {
        /// The algorithm that rejected its input.
        algorithm: AlgorithmId,
        /// Length of the `a` list.
        a: usize,
        /// Length of the `b` list.
        b: usize,
    },

    /// No algorithm is registered under the id.
    #[error("no algorithm registered with id {0}")]
    Unregistered(AlgorithmId),
}

/// Errors raised while building an [`AlgorithmRegistry`](crate::AlgorithmRegistry).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A second entry reused an existing id.
    #[error("algorithm id {0} is already registered")]
    DuplicateId(u8),

    /// A wire id that names no algorithm.
    #[error("unknown algorithm id {0}")]
    UnknownId(u8),
}
