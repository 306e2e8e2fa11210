//! Exponential backoff for transient backend failures.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::{BackendError, StoreError};

/// Errors that may clear up if the operation is repeated.
pub trait Retryable {
    /// True if retrying could succeed.
    fn is_transient(&self) -> bool;
}

impl Retryable for BackendError {
    fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Why a retried operation gave up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RetryError<E> {
    /// The operation failed with a permanent error.
    Fatal(E),
    /// Every attempt failed transiently.
    Exhausted {
        /// Attempts made, including the first.
        attempts: u32,
        /// The last failure seen.
        last: E,
    },
}

impl From<RetryError<BackendError>> for StoreError {
    fn from(err: RetryError<BackendError>) -> Self {
        match err {
            RetryError::Fatal(e) => Self::Backend(e),
            RetryError::Exhausted { attempts, last } => Self::RetriesExhausted { attempts, last },
        }
    }
}

/// Backoff schedule: the delay starts at `initial_delay_ms` and doubles after
/// each transient failure, capped at `max_delay_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Delay before the first retry.
    pub initial_delay_ms: u64,
    /// Upper bound on any single delay.
    pub max_delay_ms: u64,
    /// Total attempts, including the first.
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay_ms: 1_000,
            max_delay_ms: 600_000,
            max_attempts: 11,
        }
    }
}

impl RetryPolicy {
    /// A policy that never sleeps, for tests and synchronous runs.
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            initial_delay_ms: 0,
            max_delay_ms: 0,
            max_attempts,
        }
    }

    /// The delay before retry number `retry` (0-based).
    #[must_use]
    pub fn delay(&self, retry: u32) -> Duration {
        let factor = 1u64.checked_shl(retry).unwrap_or(u64::MAX);
        let millis = self.initial_delay_ms.saturating_mul(factor).min(self.max_delay_ms);
        Duration::from_millis(millis)
    }

    /// Runs `op` until it succeeds, fails permanently, or runs out of attempts.
    ///
    /// # Errors
    ///
    /// Returns [`RetryError::Fatal`] on a permanent failure and
    /// [`RetryError::Exhausted`] when every attempt failed transiently.
    pub fn run<T, E, F>(&self, what: &str, mut op: F) -> Result<T, RetryError<E>>
    where
        E: Retryable + std::fmt::Display,
        F: FnMut() -> Result<T, E>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_transient() => return Err(RetryError::Fatal(e)),
                Err(e) if attempt >= attempts => {
                    warn!(operation = what, attempts, error = %e, "retries exhausted");
                    return Err(RetryError::Exhausted { attempts, last: e });
                }
                Err(e) => {
                    let delay = self.delay(attempt - 1);
                    debug!(
                        operation = what,
                        attempt,
                        delay_ms = delay.as_millis(),
                        error = %e,
                        "transient failure, backing off"
                    );
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_double_up_to_cap() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(0), Duration::from_secs(1));
        assert_eq!(policy.delay(1), Duration::from_secs(2));
        assert_eq!(policy.delay(9), Duration::from_secs(512));
        assert_eq!(policy.delay(10), Duration::from_secs(600));
        assert_eq!(policy.delay(80), Duration::from_secs(600));
    }

    #[test]
    fn test_recovers_after_transient_failures() {
        let mut failures = 2;
        let result = RetryPolicy::immediate(5).run("test", || {
            if failures > 0 {
                failures -= 1;
                Err(BackendError::Transient("down".into()))
            } else {
                Ok(7)
            }
        });
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn test_exhaustion_is_reported() {
        let mut calls = 0;
        let result: Result<(), _> = RetryPolicy::immediate(3).run("test", || {
            calls += 1;
            Err(BackendError::Transient("down".into()))
        });
        assert_eq!(calls, 3);
        assert!(matches!(result, Err(RetryError::Exhausted { attempts: 3, .. })));
    }

    #[test]
    fn test_fatal_is_not_retried() {
        let mut calls = 0;
        let result: Result<(), _> = RetryPolicy::immediate(3).run("test", || {
            calls += 1;
            Err(BackendError::Fatal("bad".into()))
        });
        assert_eq!(calls, 1);
        assert_eq!(result, Err(RetryError::Fatal(BackendError::Fatal("bad".into()))));
    }
}
