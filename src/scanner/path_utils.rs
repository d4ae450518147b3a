//! Base path resolution and filter normalization.
//!
//! Every search starts from an [`AbsolutePath`]: a canonical, symlink-resolved
//! path that existed at the moment it was resolved. Raw user input never
//! reaches the walker or the cache key directly.
//!
//! # Example
//!
//! ```
//! use fs_search::scanner::path_utils::normalize_extension;
//!
//! assert_eq!(normalize_extension("log"), ".log");
//! assert_eq!(normalize_extension(".log"), ".log");
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::SearchError;

/// An absolute, canonical path to an existing filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AbsolutePath(PathBuf);

impl AbsolutePath {
    /// Resolve `raw` to an absolute, symlink-normalized path.
    ///
    /// Relative paths are resolved against the current working directory.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::PathNotFound`] if the path does not resolve to an
    /// existing entry.
    pub fn resolve(raw: impl AsRef<Path>) -> Result<Self, SearchError> {
        let raw = raw.as_ref();
        match std::fs::canonicalize(raw) {
            Ok(resolved) => {
                log::debug!("Resolved base path {} -> {}", raw.display(), resolved.display());
                Ok(Self(resolved))
            }
            Err(e) => {
                log::debug!("Failed to resolve {}: {}", raw.display(), e);
                Err(SearchError::PathNotFound(raw.to_path_buf()))
            }
        }
    }

    /// Borrow the underlying path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Current modification time in nanoseconds since the UNIX epoch.
    ///
    /// This is the staleness signal for cached results, so it keeps the full
    /// precision the filesystem reports. Times before the epoch are negative.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the metadata cannot be read.
    pub fn modification_time(&self) -> std::io::Result<i64> {
        let modified = std::fs::metadata(&self.0)?.modified()?;
        Ok(system_time_to_nanos(modified))
    }
}

impl AsRef<Path> for AbsolutePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for AbsolutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Resolve and validate the base path of a search.
///
/// Shorthand for [`AbsolutePath::resolve`].
///
/// # Errors
///
/// Returns [`SearchError::PathNotFound`] if the path does not exist.
pub fn validate_base_path(raw: impl AsRef<Path>) -> Result<AbsolutePath, SearchError> {
    AbsolutePath::resolve(raw)
}

/// Ensure an extension filter starts with a dot.
#[must_use]
pub fn normalize_extension(raw: &str) -> String {
    if raw.starts_with('.') {
        raw.to_string()
    } else {
        format!(".{raw}")
    }
}

/// Dotted suffix of the final path component, if any.
///
/// Names without an extension, including dotfiles such as `.bashrc`, have no
/// suffix.
pub(crate) fn dotted_suffix(path: &Path) -> Option<String> {
    path.extension()
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}

fn system_time_to_nanos(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_nanos()).unwrap_or(i64::MAX),
        Err(e) => i64::try_from(e.duration().as_nanos()).map_or(i64::MIN, |n| -n),
    }
}
