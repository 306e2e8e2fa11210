//! Transform registry keyed by stable id.

use ramanujan_precision::Number;
use rustc_hash::FxHashMap;

use crate::transform::TransformFn;
use crate::{RegistryError, TransformError, TransformId};

/// A registered transform.
#[derive(Clone, Copy, Debug)]
pub struct TransformEntry {
    /// Stable identifier.
    pub id: TransformId,
    /// The transform function.
    pub apply: TransformFn,
}

/// Maps transform ids to their implementations.
#[derive(Clone, Debug, Default)]
pub struct TransformRegistry {
    entries: FxHashMap<TransformId, TransformEntry>,
}

impl TransformRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding all 28 transforms.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for entry in Self::standard_entries() {
            let registered = registry.register(entry);
            debug_assert!(registered.is_ok(), "standard transform ids collide: {registered:?}");
        }
        registry
    }

    /// The built-in transforms, one per [`TransformId`].
    pub fn standard_entries() -> impl Iterator<Item = TransformEntry> {
        TransformId::ALL.into_iter().map(|id| TransformEntry {
            id,
            apply: id.function(),
        })
    }

    /// Registers a transform.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateId`] if the id is already taken.
    pub fn register(&mut self, entry: TransformEntry) -> Result<(), RegistryError> {
        if self.entries.contains_key(&entry.id) {
            return Err(RegistryError::DuplicateId(entry.id.type_id()));
        }
        self.entries.insert(entry.id, entry);
        Ok(())
    }

    /// Looks up a transform.
    #[must_use]
    pub fn get(&self, id: TransformId) -> Option<&TransformEntry> {
        self.entries.get(&id)
    }

    /// Returns the number of registered transforms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies a transform by id.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Unregistered`] for a missing entry.
    pub fn apply(&self, id: TransformId, x: &Number) -> Result<Number, TransformError> {
        let entry = self
            .get(id)
            .ok_or(TransformError::Unregistered(id.type_id()))?;
        Ok((entry.apply)(x))
    }

    /// The transforms a search runs, in id order.
    ///
    /// With `run_postproc` off only the identity runs.
    #[must_use]
    pub fn active(&self, run_postproc: bool) -> Vec<TransformEntry> {
        let mut entries: Vec<_> = self
            .entries
            .values()
            .filter(|e| run_postproc || e.id.is_identity())
            .copied()
            .collect();
        entries.sort_by_key(|e| e.id);
        entries
    }

    /// Applies every active transform, pairing each result with its id.
    #[must_use]
    pub fn expand(&self, x: &Number, run_postproc: bool) -> Vec<(TransformId, Number)> {
        self.active(run_postproc)
            .into_iter()
            .map(|entry| (entry.id, (entry.apply)(x)))
            .collect()
    }
}
