//! Memoised sequence evaluation.
//!
//! Workers evaluate the same `a` element against many `b` elements, so the
//! evaluated argument lists are cached by `(spec, index, precision)`.

use parking_lot::RwLock;
use ramanujan_precision::{Number, Precision};
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::spec::SequenceSpec;
use crate::SequenceError;

/// Default number of cached argument lists.
pub const DEFAULT_CAPACITY: usize = 4096;

type Evaluations = FxHashMap<(Precision, u64), Arc<[Number]>>;

/// A thread-safe cache of evaluated sequence elements.
///
/// When the cache holds `capacity` entries it is emptied before the next
/// insertion.
pub struct SequenceCache {
    entries: RwLock<FxHashMap<SequenceSpec, Evaluations>>,
    count: RwLock<usize>,
    capacity: usize,
}

impl SequenceCache {
    /// Creates an empty cache with [`DEFAULT_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty cache holding at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(FxHashMap::default()),
            count: RwLock::new(0),
            capacity: capacity.max(1),
        }
    }

    /// Returns the evaluated element at `index`, computing it on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfBounds`] past the end.
    pub fn get_or_evaluate(
        &self,
        spec: &SequenceSpec,
        index: u64,
        precision: Precision,
    ) -> Result<Arc<[Number]>, SequenceError> {
        if let Some(hit) = self
            .entries
            .read()
            .get(spec)
            .and_then(|evaluations| evaluations.get(&(precision, index)))
        {
            return Ok(Arc::clone(hit));
        }

        let element = spec.nth(index)?;
        let values: Arc<[Number]> = spec.evaluate(&element, precision).into();

        let mut entries = self.entries.write();
        let mut count = self.count.write();
        if *count >= self.capacity {
            entries.clear();
            *count = 0;
        }
        let evaluations = entries.entry(spec.clone()).or_default();
        if evaluations
            .insert((precision, index), Arc::clone(&values))
            .is_none()
        {
            *count += 1;
        }
        Ok(values)
    }

    /// Number of cached argument lists.
    #[must_use]
    pub fn len(&self) -> usize {
        *self.count.read()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.entries.write().clear();
        *self.count.write() = 0;
    }
}

impl Default for SequenceCache {
    fn default() -> Self {
        Self::new()
    }
}
