//! Transform lookup and registration errors.

use thiserror::Error;

/// Errors from resolving a transform.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A wire id that names no transform.
    #[error("unknown transform id {0}")]
    UnknownId(u8),

    /// The id is valid but nothing is registered under it.
    #[error("no transform registered with id {0}")]
    Unregistered(u8),
}

/// Errors raised while building a [`TransformRegistry`](crate::TransformRegistry).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A second entry reused an existing id.
    #[error("transform id {0} is already registered")]
    DuplicateId(u8),
}
