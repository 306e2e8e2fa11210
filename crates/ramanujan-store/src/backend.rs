//! The key-value backend boundary.
//!
//! The store needs string values, string lists, prefix scans with cursor
//! continuation, existence checks, and a flush. Anything offering these can
//! back a [`BucketStore`](crate::BucketStore).

use crate::BackendError;

/// One page of a prefix scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanPage {
    /// Keys on this page, in backend order.
    pub keys: Vec<String>,
    /// Cursor for the next page; `None` once the scan is complete.
    pub next: Option<String>,
}

/// A key-value store shared by every worker.
///
/// Implementations must be safe to call from many threads at once.
pub trait Backend: Send + Sync {
    /// Sets a string key.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Transient`] on connectivity failures.
    fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Reads a string key.
    ///
    /// # Errors
    ///
    /// See [`Backend::set`].
    fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Appends to the list at `key`, creating it if needed.
    ///
    /// # Errors
    ///
    /// See [`Backend::set`].
    fn push(&self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Reads the list at `key`; a missing key reads as empty.
    ///
    /// # Errors
    ///
    /// See [`Backend::set`].
    fn range(&self, key: &str) -> Result<Vec<String>, BackendError>;

    /// Returns up to `count` keys starting with `prefix`, resuming after
    /// `cursor`.
    ///
    /// # Errors
    ///
    /// See [`Backend::set`].
    fn scan(&self, prefix: &str, cursor: Option<&str>, count: usize) -> Result<ScanPage, BackendError>;

    /// Checks whether a key exists.
    ///
    /// # Errors
    ///
    /// See [`Backend::set`].
    fn exists(&self, key: &str) -> Result<bool, BackendError>;

    /// Removes every key.
    ///
    /// # Errors
    ///
    /// See [`Backend::set`].
    fn flush_all(&self) -> Result<(), BackendError>;
}
