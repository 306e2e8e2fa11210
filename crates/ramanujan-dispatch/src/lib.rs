//! # ramanujan-dispatch
//!
//! Generation side of the search: turning coefficient spaces into evaluated,
//! stored results.
//!
//! Work flows as follows:
//! - [`plan_batches`] splits each pair space into [`EvaluationBatch`]es
//! - A [`Dispatcher`] submits them to a [`WorkQueue`] with backpressure and
//!   retried enqueue
//! - Workers run each batch through the shared [`Evaluator`], which skips
//!   failed pairs, drops undefined values and writes the rest to a
//!   [`BucketStore`](ramanujan_store::BucketStore)
//!
//! [`LocalQueue`] runs batches on a rayon thread pool; [`InlineQueue`] runs
//! them on the calling thread.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod batch;
pub mod dispatcher;
pub mod error;
pub mod partition;
pub mod queue;

#[cfg(test)]
mod proptests;

pub use batch::{BatchReport, EvaluationBatch, Evaluator, StoreBatch};
pub use dispatcher::{DispatchConfig, DispatchSummary, Dispatcher};
pub use error::{DispatchError, EvaluationError, QueueError};
pub use partition::{partition, plan_batches, SidePlan};
pub use queue::{InlineQueue, JobId, JobStatus, LocalQueue, Task, WorkQueue};
