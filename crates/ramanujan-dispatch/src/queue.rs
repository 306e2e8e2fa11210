//! Work queues.
//!
//! A [`WorkQueue`] accepts self-contained [`Task`]s and reports their
//! progress by [`JobId`]. Finished results are kept for a time-to-live and
//! then forgotten, so callers must collect them promptly.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::{DispatchError, QueueError};

/// A self-contained unit of work.
pub trait Task: Send + 'static {
    /// What a successful run produces.
    type Output: Send + 'static;

    /// Runs the task to completion.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure; the job is marked failed.
    fn run(self) -> Result<Self::Output, String>;
}

/// Identifies an enqueued job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub u64);

/// Progress of a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobStatus {
    /// Waiting for a worker.
    Queued,
    /// Running.
    Started,
    /// Completed; the result is waiting to be taken.
    Finished,
    /// Completed with an error; the error is waiting to be taken.
    Failed,
    /// Unknown id, or the result outlived its time-to-live.
    Expired,
}

/// Submission and polling interface of a queue.
pub trait WorkQueue<T: Task>: Send + Sync {
    /// Submits a task.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Transient`] if the queue is temporarily
    /// unavailable.
    fn enqueue(&self, task: T) -> Result<JobId, QueueError>;

    /// Reports a job's progress.
    fn status(&self, id: JobId) -> JobStatus;

    /// Removes and returns a completed job's result.
    fn take_result(&self, id: JobId) -> Option<Result<T::Output, String>>;

    /// Jobs queued or running.
    fn outstanding(&self) -> usize;
}

enum Slot<O> {
    Queued,
    Started,
    Done { result: Result<O, String>, at: Instant },
}

struct Jobs<O> {
    slots: FxHashMap<JobId, Slot<O>>,
    ttl: Duration,
}

impl<O> Jobs<O> {
    fn new(ttl: Duration) -> Self {
        Self {
            slots: FxHashMap::default(),
            ttl,
        }
    }

    fn purge(&mut self) {
        let ttl = self.ttl;
        self.slots.retain(|_, slot| match slot {
            Slot::Done { at, .. } => at.elapsed() <= ttl,
            _ => true,
        });
    }

    fn status(&mut self, id: JobId) -> JobStatus {
        self.purge();
        match self.slots.get(&id) {
            None => JobStatus::Expired,
            Some(Slot::Queued) => JobStatus::Queued,
            Some(Slot::Started) => JobStatus::Started,
            Some(Slot::Done { result: Ok(_), .. }) => JobStatus::Finished,
            Some(Slot::Done { result: Err(_), .. }) => JobStatus::Failed,
        }
    }

    fn take(&mut self, id: JobId) -> Option<Result<O, String>> {
        self.purge();
        match self.slots.remove(&id)? {
            Slot::Done { result, .. } => Some(result),
            pending => {
                self.slots.insert(id, pending);
                None
            }
        }
    }

    fn outstanding(&self) -> usize {
        self.slots
            .values()
            .filter(|s| matches!(s, Slot::Queued | Slot::Started))
            .count()
    }
}

fn run_guarded<T: Task>(task: T) -> Result<T::Output, String> {
    catch_unwind(AssertUnwindSafe(|| task.run())).unwrap_or_else(|_| Err("task panicked".to_string()))
}

/// A queue backed by a rayon thread pool in this process.
pub struct LocalQueue<T: Task> {
    pool: rayon::ThreadPool,
    jobs: Arc<Mutex<Jobs<T::Output>>>,
    next_id: AtomicU64,
}

impl<T: Task> LocalQueue<T> {
    /// Creates a queue with `workers` threads (0 means one per CPU) that
    /// keeps results for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Pool`] if the threads cannot be started.
    pub fn new(workers: usize, ttl: Duration) -> Result<Self, DispatchError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("ramanujan-worker-{i}"))
            .build()
            .map_err(|e| DispatchError::Pool(e.to_string()))?;
        Ok(Self {
            pool,
            jobs: Arc::new(Mutex::new(Jobs::new(ttl))),
            next_id: AtomicU64::new(0),
        })
    }

    /// Number of worker threads.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl<T: Task> WorkQueue<T> for LocalQueue<T> {
    fn enqueue(&self, task: T) -> Result<JobId, QueueError> {
        let id = JobId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.jobs.lock().slots.insert(id, Slot::Queued);

        let jobs = Arc::clone(&self.jobs);
        self.pool.spawn(move || {
            jobs.lock().slots.insert(id, Slot::Started);
            let result = run_guarded(task);
            if let Err(e) = &result {
                warn!(job = id.0, error = %e, "job failed");
            }
            jobs.lock().slots.insert(
                id,
                Slot::Done {
                    result,
                    at: Instant::now(),
                },
            );
        });
        Ok(id)
    }

    fn status(&self, id: JobId) -> JobStatus {
        self.jobs.lock().status(id)
    }

    fn take_result(&self, id: JobId) -> Option<Result<T::Output, String>> {
        self.jobs.lock().take(id)
    }

    fn outstanding(&self) -> usize {
        self.jobs.lock().outstanding()
    }
}

/// A queue that runs each task on the caller's thread during `enqueue`.
///
/// Used for synchronous runs and tests.
pub struct InlineQueue<T: Task> {
    jobs: Mutex<Jobs<T::Output>>,
    next_id: AtomicU64,
}

impl<T: Task> InlineQueue<T> {
    /// Creates a queue that keeps results until they are taken.
    #[must_use]
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Jobs::new(Duration::MAX)),
            next_id: AtomicU64::new(0),
        }
    }
}

impl<T: Task> Default for InlineQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Task> WorkQueue<T> for InlineQueue<T> {
    fn enqueue(&self, task: T) -> Result<JobId, QueueError> {
        let id = JobId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let result = run_guarded(task);
        self.jobs.lock().slots.insert(
            id,
            Slot::Done {
                result,
                at: Instant::now(),
            },
        );
        Ok(id)
    }

    fn status(&self, id: JobId) -> JobStatus {
        self.jobs.lock().status(id)
    }

    fn take_result(&self, id: JobId) -> Option<Result<T::Output, String>> {
        self.jobs.lock().take(id)
    }

    fn outstanding(&self) -> usize {
        0
    }
}
