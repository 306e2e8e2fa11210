//! In-process backend with JSON snapshots.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::ops::Bound;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::backend::{Backend, ScanPage};
use crate::{BackendError, StoreError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Entry {
    Text(String),
    List(Vec<String>),
}

/// A thread-safe in-memory backend.
///
/// Clones share the same data. Keys are kept sorted, so a scan cursor is
/// simply the last key returned.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    entries: Arc<RwLock<BTreeMap<String, Entry>>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a snapshot, or starts empty if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let text = std::fs::read_to_string(path)?;
        let entries: BTreeMap<String, Entry> = serde_json::from_str(&text)?;
        info!(path = %path.display(), keys = entries.len(), "loaded store snapshot");
        Ok(Self {
            entries: Arc::new(RwLock::new(entries)),
        })
    }

    /// Writes a snapshot, replacing the file atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string(&*self.entries.read())?;
        let tmp = path.with_extension("tmp");
        {
            let mut file = std::fs::File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, path)?;
        info!(path = %path.display(), bytes = json.len(), "saved store snapshot");
        Ok(())
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the backend holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

fn wrong_type(key: &str) -> BackendError {
    BackendError::Fatal(format!("key {key} holds the wrong kind of value"))
}

impl Backend for MemoryBackend {
    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.entries
            .write()
            .insert(key.to_string(), Entry::Text(value.to_string()));
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        match self.entries.read().get(key) {
            None => Ok(None),
            Some(Entry::Text(text)) => Ok(Some(text.clone())),
            Some(Entry::List(_)) => Err(wrong_type(key)),
        }
    }

    fn push(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let mut entries = self.entries.write();
        match entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::List(Vec::new()))
        {
            Entry::List(list) => {
                list.push(value.to_string());
                Ok(())
            }
            Entry::Text(_) => Err(wrong_type(key)),
        }
    }

    fn range(&self, key: &str) -> Result<Vec<String>, BackendError> {
        match self.entries.read().get(key) {
            None => Ok(Vec::new()),
            Some(Entry::List(list)) => Ok(list.clone()),
            Some(Entry::Text(_)) => Err(wrong_type(key)),
        }
    }

    fn scan(&self, prefix: &str, cursor: Option<&str>, count: usize) -> Result<ScanPage, BackendError> {
        let entries = self.entries.read();
        let lower = match cursor {
            Some(after) => Bound::Excluded(after.to_string()),
            None => Bound::Included(prefix.to_string()),
        };
        let keys: Vec<String> = entries
            .range((lower, Bound::Unbounded))
            .map(|(k, _)| k)
            .skip_while(|k| k.as_str() < prefix)
            .take_while(|k| k.starts_with(prefix))
            .take(count.max(1))
            .cloned()
            .collect();

        let next = if keys.len() < count.max(1) {
            None
        } else {
            keys.last().cloned()
        };
        Ok(ScanPage { keys, next })
    }

    fn exists(&self, key: &str) -> Result<bool, BackendError> {
        Ok(self.entries.read().contains_key(key))
    }

    fn flush_all(&self) -> Result<(), BackendError> {
        self.entries.write().clear();
        Ok(())
    }
}
