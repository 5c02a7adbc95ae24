//! Reloadable index handle and the process-wide default instance.
//!
//! Readers take a snapshot (`Arc<SuffixIndex>`) once per call and work on it
//! without holding the lock. Reloading builds the new index first and then
//! swaps the pointer; an index being replaced or unloaded stays alive until
//! the last in-flight snapshot is dropped.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::error::{PslError, Result};
use crate::index::SuffixIndex;
use crate::source::SuffixListSource;
use crate::types::DomainParts;

/// Swappable suffix index
#[derive(Debug, Default)]
pub struct SharedIndex {
    current: RwLock<Option<Arc<SuffixIndex>>>,
}

impl SharedIndex {
    /// Create an empty handle; every query fails with `NotLoaded` until
    /// [`SharedIndex::load`] is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle that already holds `index`.
    pub fn with_index(index: SuffixIndex) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(index))),
        }
    }

    /// Build an index from `text` (bundled list when empty) and make it
    /// current.
    pub fn load(&self, text: &str) {
        self.replace(SuffixIndex::load(text));
    }

    /// Build an index from `source` and make it current. On failure the
    /// current index stays in place.
    pub fn reload_from(&self, source: &dyn SuffixListSource) -> Result<()> {
        let index = source.load_index()?;
        self.replace(index);
        Ok(())
    }

    /// Make `index` current, returning the previous one if any.
    pub fn replace(&self, index: SuffixIndex) -> Option<Arc<SuffixIndex>> {
        let index = Arc::new(index);
        log::info!("Loaded suffix index with {} known suffixes", index.len());
        self.current.write().replace(index)
    }

    /// Drop the current index. In-flight snapshots keep it alive until they
    /// finish.
    pub fn unload(&self) -> Option<Arc<SuffixIndex>> {
        let previous = self.current.write().take();
        if previous.is_some() {
            log::info!("Unloaded suffix index");
        }
        previous
    }

    /// Check if an index is loaded
    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    /// Snapshot of the current index.
    pub fn snapshot(&self) -> Result<Arc<SuffixIndex>> {
        self.current.read().clone().ok_or(PslError::NotLoaded)
    }

    /// Split `domain` using the current index.
    pub fn extract(&self, domain: &str) -> Result<DomainParts> {
        self.snapshot()?.extract_parts(domain)
    }

    /// Split the host of `url` using the current index.
    pub fn extract_from_url(&self, url: &str) -> Result<DomainParts> {
        Ok(self.snapshot()?.extract_from_url(url)?.to_parts())
    }

    /// Validate `domain` against the current index.
    pub fn is_valid_domain(&self, domain: &str) -> Result<bool> {
        Ok(self.snapshot()?.is_valid_domain(domain))
    }

    /// All known suffixes of the current index.
    pub fn all_suffixes(&self) -> Result<Vec<String>> {
        Ok(self.snapshot()?.all_suffixes())
    }
}

static GLOBAL: Lazy<SharedIndex> = Lazy::new(SharedIndex::new);

/// The process-wide index used by the free functions of this crate.
pub fn global() -> &'static SharedIndex {
    &GLOBAL
}

/// Load the process-wide index (bundled list when `text` is empty).
pub fn load(text: &str) {
    GLOBAL.load(text);
}

/// Unload the process-wide index.
pub fn unload() {
    GLOBAL.unload();
}

/// Split `domain` with the process-wide index.
pub fn extract(domain: &str) -> Result<DomainParts> {
    GLOBAL.extract(domain)
}

/// Split the host of `url` with the process-wide index.
pub fn extract_from_url(url: &str) -> Result<DomainParts> {
    GLOBAL.extract_from_url(url)
}

/// Validate `domain` with the process-wide index.
pub fn is_valid_domain(domain: &str) -> Result<bool> {
    GLOBAL.is_valid_domain(domain)
}

/// All known suffixes of the process-wide index.
pub fn all_suffixes() -> Result<Vec<String>> {
    GLOBAL.all_suffixes()
}
