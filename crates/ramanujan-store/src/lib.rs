//! # ramanujan-store
//!
//! The precision-keyed bucket store shared by every worker of a search.
//!
//! Results are filed under the truncated decimal text of their absolute
//! value, so two independently computed values that agree to the store's
//! accuracy land in the same bucket. This crate provides:
//! - Key derivation ([`BucketKey`]) that is identical for numeric and
//!   pre-rendered inputs
//! - Versioned provenance records ([`ResultRecord`], [`MatchRecord`])
//! - The [`Backend`] boundary and an in-memory backend with JSON snapshots
//! - [`BucketStore`], with accuracy history and duplicate suppression
//! - Exponential backoff for transient backend failures ([`RetryPolicy`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod backend;
pub mod error;
pub mod key;
pub mod memory;
pub mod record;
pub mod retry;
pub mod store;

#[cfg(test)]
mod proptests;

pub use backend::{Backend, ScanPage};
pub use error::{BackendError, StoreError};
pub use key::{truncate_pad, BucketKey, Side};
pub use memory::MemoryBackend;
pub use record::{MatchRecord, ResultRecord, SCHEMA_VERSION};
pub use retry::{RetryError, RetryPolicy, Retryable};
pub use store::{BucketStore, KeyScan, SetOutcome};
