//! The umbrella error of the facade and the binary.

use ramanujan_dispatch::DispatchError;
use ramanujan_search::SearchError;
use ramanujan_sequences::SequenceError;
use ramanujan_store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Anything that can stop a pipeline command.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        /// The file.
        path: PathBuf,
        /// The I/O failure.
        source: std::io::Error,
    },

    /// The configuration is not valid JSON for [`SearchConfig`](crate::SearchConfig).
    #[error("malformed config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The configuration parsed but is inconsistent.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A configured generator is invalid.
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Submitting batches failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The search failed.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The log subscriber could not be installed.
    #[error("logging: {0}")]
    Logging(String),
}
