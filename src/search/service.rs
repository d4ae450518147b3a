//! Cached search orchestration.
//!
//! [`SearchService::search`] runs one invocation through the following steps:
//!
//! 1. Reject conflicting mode flags before any I/O.
//! 2. Derive the [`CacheKey`] for the parameters.
//! 3. Depending on [`SearchOptions`]:
//!    - caching disabled, or no store configured: walk, never touching the
//!      cache file;
//!    - forced refresh: drop this key from the loaded cache, walk, write back;
//!    - otherwise: load the cache and return the stored results if they are
//!      still valid, else walk and write back.

use std::fmt;
use std::sync::Arc;

use crate::cache::{CacheEntry, CacheKey, CacheMap, CacheStore};
use crate::error::SearchError;
use crate::progress::ProgressCallback;
use crate::scanner::{ScanError, Walker};

use super::params::{ensure_compatible_modes, SearchParameters};

/// Caching controls for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Read and write the cache. When false the cache file is never touched.
    pub use_cache: bool,
    /// Discard any entry for these parameters and walk again.
    pub force_refresh: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            force_refresh: false,
        }
    }
}

impl SearchOptions {
    /// Options that bypass the cache entirely.
    #[must_use]
    pub fn uncached() -> Self {
        Self {
            use_cache: false,
            force_refresh: false,
        }
    }

    /// Options that force a fresh walk and rewrite the entry.
    #[must_use]
    pub fn refresh() -> Self {
        Self {
            use_cache: true,
            force_refresh: true,
        }
    }
}

/// How the results of a search were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Caching was disabled or no store was configured; the tree was walked.
    Disabled,
    /// Valid cached results were returned without walking.
    Hit,
    /// No valid entry existed; the tree was walked and the entry stored.
    Miss,
    /// The entry was invalidated on request; the tree was walked and the entry
    /// stored.
    Refreshed,
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheStatus::Disabled => write!(f, "disabled"),
            CacheStatus::Hit => write!(f, "hit"),
            CacheStatus::Miss => write!(f, "miss"),
            CacheStatus::Refreshed => write!(f, "refreshed"),
        }
    }
}

/// Results of a search together with how they were produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Key the parameters map to.
    pub key: CacheKey,
    /// Matched paths in walk order.
    pub results: Vec<String>,
    /// Cache behavior for this search.
    pub status: CacheStatus,
}

/// Search entry point combining the walker with the result cache.
pub struct SearchService {
    store: Option<CacheStore>,
    progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl fmt::Debug for SearchService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchService")
            .field("store", &self.store)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl SearchService {
    /// Create a service backed by `store`.
    #[must_use]
    pub fn new(store: CacheStore) -> Self {
        Self {
            store: Some(store),
            progress_callback: None,
        }
    }

    /// Create a service that always walks and never reads or writes a cache.
    #[must_use]
    pub fn without_cache() -> Self {
        Self {
            store: None,
            progress_callback: None,
        }
    }

    /// Set the progress callback forwarded to every walk.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// The cache store used by this service, if any.
    #[must_use]
    pub fn store(&self) -> Option<&CacheStore> {
        self.store.as_ref()
    }

    /// Run a search.
    ///
    /// # Errors
    ///
    /// - [`SearchError::ConflictingMode`] if both mode flags are set, raised
    ///   before any filesystem access.
    /// - [`SearchError::Traversal`] if the walk fails.
    /// - [`SearchError::Cache`] if the cache file cannot be read or written.
    ///   A corrupt cache file is not an error; it counts as a miss.
    pub fn search(
        &self,
        params: &SearchParameters,
        options: SearchOptions,
    ) -> Result<SearchOutcome, SearchError> {
        ensure_compatible_modes(params.files_only(), params.folders_only())?;

        let key = CacheKey::derive(params);
        log::debug!("Search of {} has cache key {}", params.base_path(), key);

        let store = match self.store {
            Some(ref store) if options.use_cache => store,
            _ => {
                let results = self.walk(params)?;
                return Ok(SearchOutcome {
                    key,
                    results,
                    status: CacheStatus::Disabled,
                });
            }
        };

        let mut map = store.load()?;

        if options.force_refresh {
            if map.remove(&key).is_some() {
                log::info!("Discarded cached results for {}", params.base_path());
            }
            let results = self.walk_and_store(store, params, &key, map)?;
            return Ok(SearchOutcome {
                key,
                results,
                status: CacheStatus::Refreshed,
            });
        }

        if store.is_valid(&map, &key, params.base_path()) {
            if let Some(entry) = map.get(&key) {
                log::info!(
                    "Using cached results for {} ({} entries)",
                    params.base_path(),
                    entry.results.len()
                );
                if let Some(stored_at) = entry.stored_at {
                    log::debug!("Cached results were stored at {}", stored_at.to_rfc3339());
                }
                return Ok(SearchOutcome {
                    key,
                    results: entry.results.clone(),
                    status: CacheStatus::Hit,
                });
            }
        }

        let results = self.walk_and_store(store, params, &key, map)?;
        Ok(SearchOutcome {
            key,
            results,
            status: CacheStatus::Miss,
        })
    }

    fn walk(&self, params: &SearchParameters) -> Result<Vec<String>, SearchError> {
        let mut walker = Walker::new(params.base_path().as_path(), params.walker_config());
        if let Some(ref callback) = self.progress_callback {
            walker = walker.with_progress_callback(Arc::clone(callback));
        }
        Ok(walker.walk()?)
    }

    /// Walk, record the results under `key` in `map` and persist it.
    ///
    /// The modification time is read before walking, so any change made while
    /// the walk runs leaves the stored entry stale.
    fn walk_and_store(
        &self,
        store: &CacheStore,
        params: &SearchParameters,
        key: &CacheKey,
        mut map: CacheMap,
    ) -> Result<Vec<String>, SearchError> {
        let base = params.base_path();
        let modification_time = base
            .modification_time()
            .map_err(|e| ScanError::from_io(base.as_path(), e))?;

        let results = self.walk(params)?;

        map.insert(key.clone(), CacheEntry::new(modification_time, results.clone()));
        store.save(&map)?;
        log::debug!("Stored {} results under {}", results.len(), key);

        Ok(results)
    }
}
