//! Submitting tasks with backpressure.
//!
//! The dispatcher is the single-threaded orchestrator: it enqueues tasks,
//! pauses while the queue holds more than `max_workqueue_size` jobs, drains
//! down to `min_workqueue_size` after the last submission, and finally waits
//! for every job. Failed jobs are counted, never resubmitted.

use ramanujan_store::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::queue::{JobId, JobStatus, Task, WorkQueue};
use crate::DispatchError;

/// Queue depth and polling settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Pairs per batch.
    pub batch_size: u64,
    /// Outstanding jobs to drain down to after submission.
    pub min_workqueue_size: usize,
    /// Outstanding jobs above which submission pauses.
    pub max_workqueue_size: usize,
    /// Sleep between queue polls.
    pub poll_interval_ms: u64,
    /// Backoff for transient enqueue failures.
    pub retry: RetryPolicy,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 100,
            min_workqueue_size: 10,
            max_workqueue_size: 100,
            poll_interval_ms: 100,
            retry: RetryPolicy::default(),
        }
    }
}

impl DispatchConfig {
    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Outcome of a dispatch run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchSummary<O> {
    /// Jobs submitted.
    pub submitted: usize,
    /// Outputs of finished jobs, in completion order.
    pub outputs: Vec<O>,
    /// Error messages of failed jobs.
    pub failures: Vec<String>,
    /// Jobs whose result expired before it was collected.
    pub expired: usize,
}

impl<O> Default for DispatchSummary<O> {
    fn default() -> Self {
        Self {
            submitted: 0,
            outputs: Vec::new(),
            failures: Vec::new(),
            expired: 0,
        }
    }
}

impl<O> DispatchSummary<O> {
    /// Jobs that finished successfully.
    #[must_use]
    pub fn finished(&self) -> usize {
        self.outputs.len()
    }

    /// Jobs that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Drives a [`WorkQueue`].
pub struct Dispatcher<'q, Q> {
    queue: &'q Q,
    config: DispatchConfig,
}

impl<'q, Q> Dispatcher<'q, Q> {
    /// Creates a dispatcher over `queue`.
    #[must_use]
    pub fn new(queue: &'q Q, config: DispatchConfig) -> Self {
        Self { queue, config }
    }

    /// Submits every task and waits for all of them.
    ///
    /// # Errors
    ///
    /// Returns an error if enqueueing fails permanently or keeps failing
    /// transiently. Jobs already submitted keep running.
    pub fn run<T, I>(&self, tasks: I) -> Result<DispatchSummary<T::Output>, DispatchError>
    where
        T: Task + Clone,
        Q: WorkQueue<T>,
        I: IntoIterator<Item = T>,
    {
        let mut pending: Vec<JobId> = Vec::new();
        let mut summary = DispatchSummary::default();

        for task in tasks {
            while self.queue.outstanding() > self.config.max_workqueue_size {
                self.reap::<T>(&mut pending, &mut summary);
                std::thread::sleep(self.config.poll_interval());
            }
            let id = self
                .config
                .retry
                .run("enqueue", || self.queue.enqueue(task.clone()))?;
            pending.push(id);
            summary.submitted += 1;
            self.reap::<T>(&mut pending, &mut summary);
        }
        info!(submitted = summary.submitted, "all jobs submitted");

        while self.queue.outstanding() > self.config.min_workqueue_size {
            self.reap::<T>(&mut pending, &mut summary);
            std::thread::sleep(self.config.poll_interval());
        }
        self.wait::<T>(&mut pending, &mut summary);

        info!(
            finished = summary.finished(),
            failed = summary.failed(),
            expired = summary.expired,
            "dispatch complete"
        );
        Ok(summary)
    }

    fn wait<T>(&self, pending: &mut Vec<JobId>, summary: &mut DispatchSummary<T::Output>)
    where
        T: Task,
        Q: WorkQueue<T>,
    {
        loop {
            self.reap::<T>(pending, summary);
            if pending.is_empty() {
                return;
            }
            debug!(outstanding = pending.len(), "waiting for jobs");
            std::thread::sleep(self.config.poll_interval());
        }
    }

    /// Collects every completed job, keeping the rest pending.
    fn reap<T>(&self, pending: &mut Vec<JobId>, summary: &mut DispatchSummary<T::Output>)
    where
        T: Task,
        Q: WorkQueue<T>,
    {
        pending.retain(|&id| match self.queue.status(id) {
            JobStatus::Queued | JobStatus::Started => true,
            JobStatus::Finished | JobStatus::Failed => {
                match self.queue.take_result(id) {
                    Some(Ok(output)) => summary.outputs.push(output),
                    Some(Err(e)) => summary.failures.push(e),
                    None => summary.expired += 1,
                }
                false
            }
            JobStatus::Expired => {
                warn!(job = id.0, "job result expired before collection");
                summary.expired += 1;
                false
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InlineQueue, LocalQueue, QueueError};
    use parking_lot::Mutex;

    #[derive(Clone)]
    struct Double(u32);

    impl Task for Double {
        type Output = u32;

        fn run(self) -> Result<u32, String> {
            if self.0 == 7 {
                Err("seven".to_string())
            } else {
                Ok(self.0 * 2)
            }
        }
    }

    fn config() -> DispatchConfig {
        DispatchConfig {
            batch_size: 1,
            min_workqueue_size: 1,
            max_workqueue_size: 3,
            poll_interval_ms: 1,
            retry: RetryPolicy::immediate(3),
        }
    }

    #[test]
    fn test_inline_dispatch_counts() {
        let queue = InlineQueue::new();
        let summary = Dispatcher::new(&queue, config())
            .run((0..10).map(Double))
            .unwrap();
        assert_eq!(summary.submitted, 10);
        assert_eq!(summary.finished(), 9);
        assert_eq!(summary.failures, vec!["seven".to_string()]);
        assert_eq!(summary.outputs.iter().sum::<u32>(), (0..10).filter(|&n| n != 7).map(|n| n * 2).sum::<u32>());
    }

    #[test]
    fn test_local_dispatch_with_backpressure() {
        let queue = LocalQueue::new(2, Duration::from_secs(60)).unwrap();
        let summary = Dispatcher::new(&queue, config())
            .run((0..50).map(Double))
            .unwrap();
        assert_eq!(summary.submitted, 50);
        assert_eq!(summary.finished() + summary.failed(), 50);
        assert_eq!(summary.expired, 0);
        assert_eq!(queue.outstanding(), 0);
    }

    struct Flaky {
        inner: InlineQueue<Double>,
        failures_left: Mutex<u32>,
        fatal: bool,
    }

    impl WorkQueue<Double> for Flaky {
        fn enqueue(&self, task: Double) -> Result<JobId, QueueError> {
            if self.fatal {
                return Err(QueueError::Fatal("rejected".to_string()));
            }
            let mut left = self.failures_left.lock();
            if *left > 0 {
                *left -= 1;
                return Err(QueueError::Transient("connection reset".to_string()));
            }
            drop(left);
            self.inner.enqueue(task)
        }

        fn status(&self, id: JobId) -> JobStatus {
            self.inner.status(id)
        }

        fn take_result(&self, id: JobId) -> Option<Result<u32, String>> {
            self.inner.take_result(id)
        }

        fn outstanding(&self) -> usize {
            self.inner.outstanding()
        }
    }

    #[test]
    fn test_enqueue_retries_transient_failures() {
        let queue = Flaky {
            inner: InlineQueue::new(),
            failures_left: Mutex::new(2),
            fatal: false,
        };
        let summary = Dispatcher::new(&queue, config()).run([Double(1)]).unwrap();
        assert_eq!(summary.outputs, vec![2]);
    }

    #[test]
    fn test_enqueue_gives_up() {
        let queue = Flaky {
            inner: InlineQueue::new(),
            failures_left: Mutex::new(10),
            fatal: false,
        };
        let err = Dispatcher::new(&queue, config()).run([Double(1)]).unwrap_err();
        assert!(matches!(err, DispatchError::RetriesExhausted { attempts: 3, .. }));

        let queue = Flaky {
            inner: InlineQueue::new(),
            failures_left: Mutex::new(0),
            fatal: true,
        };
        let err = Dispatcher::new(&queue, config()).run([Double(1)]).unwrap_err();
        assert!(matches!(err, DispatchError::Queue(QueueError::Fatal(_))));
    }
}
