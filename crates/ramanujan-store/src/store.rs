//! The bucket store.
//!
//! Each bucket is a backend list under `side:key`, holding serialized
//! [`ResultRecord`]s. The accuracy used to derive keys lives in the backend
//! itself (`config:accuracy`), along with every accuracy used before it
//! (`config:accuracy_history`, oldest first), so buckets written at an
//! older accuracy stay reachable from any process.

use parking_lot::RwLock;
use ramanujan_precision::Number;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info};

use crate::backend::Backend;
use crate::{BucketKey, MatchRecord, ResultRecord, RetryPolicy, Side, StoreError};

/// Backend key of the current accuracy.
pub const ACCURACY_KEY: &str = "config:accuracy";

/// Backend key of the accuracy history.
pub const HISTORY_KEY: &str = "config:accuracy_history";

/// Key prefix of confirmed matches.
pub const MATCH_PREFIX: &str = "match:";

/// Keys fetched per scan page.
const SCAN_PAGE: usize = 1000;

/// What [`BucketStore::set`] did with a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetOutcome {
    /// The record was appended to its bucket.
    Stored,
    /// An identical record was already present.
    Duplicate,
    /// The value was NaN or infinite and was not stored.
    Dropped,
}

#[derive(Clone, Debug, Default)]
struct AccuracyState {
    current: usize,
    history: Vec<usize>,
}

/// A precision-keyed multimap from values to result records.
///
/// Writers never coordinate: duplicate suppression is a read-then-append,
/// so concurrent writers may occasionally store the same record twice, but
/// no write is ever lost.
pub struct BucketStore<B: Backend> {
    backend: Arc<B>,
    retry: RetryPolicy,
    accuracy: RwLock<AccuracyState>,
}

impl<B: Backend> BucketStore<B> {
    /// Opens a store, adopting the accuracy already recorded in the backend
    /// or recording `default_accuracy` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or holds malformed settings.
    pub fn open(backend: Arc<B>, default_accuracy: usize, retry: RetryPolicy) -> Result<Self, StoreError> {
        let store = Self {
            backend,
            retry,
            accuracy: RwLock::new(AccuracyState::default()),
        };
        store.reload_accuracy(default_accuracy)?;
        Ok(store)
    }

    /// The shared backend.
    #[must_use]
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// The retry policy used for backend calls.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    fn reload_accuracy(&self, default_accuracy: usize) -> Result<(), StoreError> {
        let stored = self.retry.run("get accuracy", || self.backend.get(ACCURACY_KEY))?;
        let current = match stored {
            Some(text) => parse_setting(ACCURACY_KEY, &text)?,
            None => {
                self.retry.run("set accuracy", || {
                    self.backend.set(ACCURACY_KEY, &default_accuracy.to_string())
                })?;
                default_accuracy
            }
        };
        let history = self
            .retry
            .run("read accuracy history", || self.backend.range(HISTORY_KEY))?
            .iter()
            .map(|text| parse_setting(HISTORY_KEY, text))
            .collect::<Result<Vec<_>, _>>()?;

        *self.accuracy.write() = AccuracyState { current, history };
        Ok(())
    }

    /// The accuracy used for new keys.
    #[must_use]
    pub fn accuracy(&self) -> usize {
        self.accuracy.read().current
    }

    /// Accuracies used before the current one, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<usize> {
        self.accuracy.read().history.clone()
    }

    /// Changes the key accuracy, recording the previous one in the history.
    ///
    /// Buckets written under earlier accuracies are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn set_accuracy(&self, accuracy: usize) -> Result<(), StoreError> {
        let mut state = self.accuracy.write();
        if state.current == accuracy {
            return Ok(());
        }
        let previous = state.current;
        let text = previous.to_string();
        self.retry
            .run("push accuracy history", || self.backend.push(HISTORY_KEY, &text))?;
        self.retry.run("set accuracy", || {
            self.backend.set(ACCURACY_KEY, &accuracy.to_string())
        })?;
        info!(from = previous, to = accuracy, "bucket accuracy changed");
        state.history.push(previous);
        state.current = accuracy;
        Ok(())
    }

    /// The key `value` maps to at the current accuracy.
    #[must_use]
    pub fn key(&self, side: Side, value: &Number) -> Option<BucketKey> {
        BucketKey::from_number(side, value, self.accuracy())
    }

    /// Adds a record to the bucket of `value`.
    ///
    /// NaN and infinite values are dropped. A record whose serialization is
    /// already in the bucket is not appended again.
    ///
    /// Appends are atomic in the backend, so concurrent writers never lose
    /// records. Two writers racing with the same record may both append it.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the backend keeps failing.
    pub fn set(&self, side: Side, value: &Number, record: &ResultRecord) -> Result<SetOutcome, StoreError> {
        let Some(key) = self.key(side, value) else {
            return Ok(SetOutcome::Dropped);
        };
        let storage = key.storage_key();
        let encoded = record.encode()?;

        let existing = self.retry.run("read bucket", || self.backend.range(&storage))?;
        if existing.iter().any(|e| *e == encoded) {
            return Ok(SetOutcome::Duplicate);
        }
        self.retry.run("append to bucket", || self.backend.push(&storage, &encoded))?;
        Ok(SetOutcome::Stored)
    }

    /// The records in the bucket of `value`.
    ///
    /// The current accuracy's bucket is tried first, then each historical
    /// accuracy, oldest first; the first non-empty bucket wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or a record cannot be decoded.
    pub fn get(&self, side: Side, value: &Number) -> Result<Vec<ResultRecord>, StoreError> {
        match value.abs() {
            Number::Real(r) => self.get_decimal(side, &r.to_string()),
            _ => Ok(Vec::new()),
        }
    }

    /// Like [`BucketStore::get`], for a pre-rendered decimal value.
    ///
    /// # Errors
    ///
    /// See [`BucketStore::get`].
    pub fn get_decimal(&self, side: Side, decimal: &str) -> Result<Vec<ResultRecord>, StoreError> {
        let state = self.accuracy.read().clone();
        for accuracy in std::iter::once(state.current).chain(state.history) {
            let records = self.get_key(&BucketKey::from_decimal(side, decimal, accuracy))?;
            if !records.is_empty() {
                return Ok(records);
            }
        }
        Ok(Vec::new())
    }

    /// The records under an exact key.
    ///
    /// # Errors
    ///
    /// See [`BucketStore::get`].
    pub fn get_key(&self, key: &BucketKey) -> Result<Vec<ResultRecord>, StoreError> {
        let storage = key.storage_key();
        self.retry
            .run("read bucket", || self.backend.range(&storage))?
            .iter()
            .map(|json| ResultRecord::decode(json))
            .collect()
    }

    /// Lazily lists the keys of one side, optionally restricted to keys
    /// whose text starts with `prefix`.
    ///
    /// Each call starts a fresh scan.
    #[must_use]
    pub fn scan(&self, side: Side, prefix: Option<&str>) -> KeyScan<'_, B> {
        KeyScan {
            store: self,
            prefix: format!("{}:{}", side.prefix(), prefix.unwrap_or("")),
            cursor: None,
            buffer: VecDeque::new(),
            done: false,
        }
    }

    /// Number of distinct keys on one side.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend scan fails.
    pub fn size(&self, side: Side) -> Result<usize, StoreError> {
        self.scan(side, None).try_fold(0, |n, key| key.map(|_| n + 1))
    }

    /// Stores a confirmed match under `match:<sha256>`, returning the key.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend fails.
    pub fn put_match(&self, record: &MatchRecord) -> Result<String, StoreError> {
        let key = record.storage_key()?;
        let encoded = record.encode()?;
        self.retry.run("store match", || self.backend.set(&key, &encoded))?;
        debug!(key = %key, precision = %record.precision, "stored match");
        Ok(key)
    }

    /// Every stored match, in key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or a match cannot be decoded.
    pub fn matches(&self) -> Result<Vec<MatchRecord>, StoreError> {
        let mut matches = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page = self.retry.run("scan matches", || {
                self.backend.scan(MATCH_PREFIX, cursor.as_deref(), SCAN_PAGE)
            })?;
            for key in &page.keys {
                if let Some(json) = self.retry.run("read match", || self.backend.get(key))? {
                    matches.push(MatchRecord::decode(&json)?);
                }
            }
            match page.next {
                Some(next) => cursor = Some(next),
                None => return Ok(matches),
            }
        }
    }

    /// Removes everything and restores `accuracy` with an empty history.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn clear(&self, accuracy: usize) -> Result<(), StoreError> {
        self.retry.run("flush", || self.backend.flush_all())?;
        info!("store cleared");
        self.reload_accuracy(accuracy)
    }
}

fn parse_setting(key: &str, text: &str) -> Result<usize, StoreError> {
    text.trim().parse().map_err(|_| StoreError::MalformedSetting {
        key: key.to_string(),
        value: text.to_string(),
    })
}

/// Iterator over the keys of one side, fetched a page at a time.
pub struct KeyScan<'a, B: Backend> {
    store: &'a BucketStore<B>,
    prefix: String,
    cursor: Option<String>,
    buffer: VecDeque<String>,
    done: bool,
}

impl<B: Backend> Iterator for KeyScan<'_, B> {
    type Item = Result<BucketKey, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(raw) = self.buffer.pop_front() {
                if let Some(key) = BucketKey::parse(&raw) {
                    return Some(Ok(key));
                }
                continue;
            }
            if self.done {
                return None;
            }
            let page = self.store.retry.run("scan buckets", || {
                self.store
                    .backend
                    .scan(&self.prefix, self.cursor.as_deref(), SCAN_PAGE)
            });
            match page {
                Ok(page) => {
                    self.buffer.extend(page.keys);
                    self.done = page.next.is_none();
                    self.cursor = page.next;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
