//! Backend and store errors.

use thiserror::Error;

/// Errors reported by a key-value backend.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BackendError {
    /// A connectivity failure worth retrying.
    #[error("transient backend failure: {0}")]
    Transient(String),

    /// A failure that retrying cannot fix.
    #[error("backend failure: {0}")]
    Fatal(String),
}

/// Errors from the bucket store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend failed permanently.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A transient backend failure persisted through every retry.
    #[error("backend still failing after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Attempts made, including the first.
        attempts: u32,
        /// The last failure seen.
        last: BackendError,
    },

    /// A record or snapshot could not be (de)serialized.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored record was written with an unknown schema version.
    #[error("unsupported record schema version {0}")]
    UnknownSchema(u32),

    /// A stored configuration value is malformed.
    #[error("malformed stored setting {key}: {value}")]
    MalformedSetting {
        /// The configuration key.
        key: String,
        /// The stored text.
        value: String,
    },

    /// Reading or writing a snapshot file failed.
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
