use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use vitals_core::DatasetLoadError;

use crate::loader::{self, DatasetKey, IndexedDataset};

/// Explicit cache of indexed datasets keyed by file path and content digest.
///
/// Owned by whoever needs it and passed in; nothing is memoised globally.
/// An entry is only dropped through [`DatasetCache::invalidate`] or
/// [`DatasetCache::reload`].
#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<DatasetKey, Arc<IndexedDataset>>,
    hits: u64,
    misses: u64,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the indexed dataset for `path`, indexing it on first use.
    ///
    /// The file is read and hashed on every call so that a changed file gets
    /// its own entry. A failed load leaves the cache untouched.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<IndexedDataset>, DatasetLoadError> {
        let bytes = loader::read_bytes(path)?;
        let key = DatasetKey::compute(path, &bytes);

        if let Some(dataset) = self.entries.get(&key) {
            self.hits += 1;
            debug!(path = %key.path.display(), "Dataset cache hit");
            return Ok(Arc::clone(dataset));
        }

        self.misses += 1;
        let dataset = Arc::new(IndexedDataset::from_bytes(key.clone(), &bytes)?);
        // One series per file: an older digest of the same path is stale.
        self.entries.retain(|cached, _| cached.path != key.path);
        self.entries.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drop every cached entry for `path`, then index it again.
    pub fn reload(&mut self, path: &Path) -> Result<Arc<IndexedDataset>, DatasetLoadError> {
        let dropped = self.invalidate(path);
        info!(path = %path.display(), dropped, "Reloading dataset");
        self.get_or_load(path)
    }

    /// Drop every cached entry for `path`. Returns how many were removed.
    pub fn invalidate(&mut self, path: &Path) -> usize {
        let target = loader::normalize_path(path);
        let before = self.entries.len();
        self.entries.retain(|key, _| key.path != target);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
