//! JSON-file backed result cache.

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{CacheKey, CacheMap};
use crate::scanner::AbsolutePath;

/// Errors raised while reading or writing the cache file.
#[derive(thiserror::Error, Debug)]
pub enum CacheError {
    /// The cache file could not be read or written.
    #[error("Cache I/O error for {path}: {source}")]
    Io {
        /// Path of the cache file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The cache contents could not be serialized.
    #[error("Failed to serialize cache: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The cache file exists but does not parse.
    #[error("Cache file {path} is corrupted: {source}")]
    Corrupted {
        /// Path of the cache file
        path: PathBuf,
        /// The parse error
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Persistent mapping from [`CacheKey`] to [`CacheEntry`](super::CacheEntry) kept in one file.
///
/// The store holds no data between calls: every operation works on a map
/// loaded for that call and, where needed, writes the whole map back.
/// There is no locking. Two processes saving at the same time race and the
/// later write wins.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    /// Create a store backed by the file at `path`. Nothing is read yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the cache file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cache, treating a missing or corrupt file as empty.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] if the file exists but cannot be read.
    pub fn load(&self) -> CacheResult<CacheMap> {
        match self.try_load() {
            Err(CacheError::Corrupted { path, source }) => {
                log::warn!(
                    "Ignoring corrupted cache file {}: {}",
                    path.display(),
                    source
                );
                Ok(CacheMap::new())
            }
            other => other,
        }
    }

    /// Load the cache, reporting corruption as an error.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] for read failures and
    /// [`CacheError::Corrupted`] if the contents do not parse.
    pub fn try_load(&self) -> CacheResult<CacheMap> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No cache file at {}, starting cold", self.path.display());
                return Ok(CacheMap::new());
            }
            Err(source) => return Err(self.io_error(source)),
        };

        let map: CacheMap =
            serde_json::from_slice(&content).map_err(|source| CacheError::Corrupted {
                path: self.path.clone(),
                source,
            })?;

        log::debug!(
            "Loaded {} cache entries from {}",
            map.len(),
            self.path.display()
        );
        Ok(map)
    }

    /// Overwrite the cache file with `map`.
    ///
    /// The map is written to a temporary file next to the cache and renamed
    /// over it, so readers see either the old or the new file in full.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] if the directory or file cannot be written.
    pub fn save(&self, map: &CacheMap) -> CacheResult<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|source| self.io_error(source))?;

        let temp = NamedTempFile::new_in(&parent).map_err(|source| self.io_error(source))?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer(&mut writer, map)?;
            writer.flush().map_err(|source| self.io_error(source))?;
        }
        temp.persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;

        log::debug!("Saved {} cache entries to {}", map.len(), self.path.display());
        Ok(())
    }

    /// Drop every entry and persist the empty cache.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] if the file cannot be written.
    pub fn clear(&self) -> CacheResult<()> {
        let mut map = self.load()?;
        let removed = map.len();
        map.clear();
        self.save(&map)?;
        log::info!("Cleared {} cache entries", removed);
        Ok(())
    }

    /// Check whether `key` holds results that are still current for `base`.
    ///
    /// True only if the key is present and its stored modification time equals
    /// the base path's current modification time. A base path whose metadata
    /// cannot be read is treated as stale.
    #[must_use]
    pub fn is_valid(&self, map: &CacheMap, key: &CacheKey, base: &AbsolutePath) -> bool {
        let Some(entry) = map.get(key) else {
            log::debug!("Cache miss for {}: no entry", key);
            return false;
        };

        match base.modification_time() {
            Ok(mtime) if entry.matches_mtime(mtime) => true,
            Ok(mtime) => {
                log::debug!(
                    "Cache entry {} is stale: stored mtime {} != current {}",
                    key,
                    entry.modification_time,
                    mtime
                );
                false
            }
            Err(e) => {
                log::debug!("Cannot read mtime of {}: {}", base, e);
                false
            }
        }
    }

    fn io_error(&self, source: std::io::Error) -> CacheError {
        CacheError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
