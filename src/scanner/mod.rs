//! Scanner module for directory traversal.
//!
//! This module provides functionality for:
//! - Resolving and validating the base path of a search
//! - Normalizing extension filters
//! - Walking a directory tree with directory pruning and extension exclusion
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`path_utils`]: Base path resolution and filter normalization
//! - [`walker`]: Directory traversal and entry discovery
//!
//! # Example
//!
//! ```no_run
//! use fs_search::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig::default()
//!     .with_exclude_extensions([".log"])
//!     .with_exclude_dirs(["node_modules"]);
//!
//! let walker = Walker::new(Path::new("."), config);
//! match walker.walk() {
//!     Ok(paths) => paths.iter().for_each(|p| println!("{}", p)),
//!     Err(e) => eprintln!("Walk failed: {}", e),
//! }
//! ```

pub mod path_utils;
pub mod walker;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub use path_utils::{normalize_extension, validate_base_path, AbsolutePath};
pub use walker::Walker;

/// Configuration for directory walking.
///
/// Controls which directories are pruned, which file extensions are skipped,
/// and whether files, folders, or both are emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Dotted extensions (e.g. `.log`) whose files are never emitted.
    pub exclude_extensions: BTreeSet<String>,

    /// Directory names that are pruned along with their entire subtree.
    /// Matched against the exact directory name, not against a path or glob.
    pub exclude_dirs: BTreeSet<String>,

    /// Emit files only.
    pub files_only: bool,

    /// Emit directories only.
    pub folders_only: bool,
}

impl WalkerConfig {
    /// Set the excluded extensions. Each entry is normalized to dotted form.
    #[must_use]
    pub fn with_exclude_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude_extensions = extensions
            .into_iter()
            .map(|e| normalize_extension(e.as_ref()))
            .collect();
        self
    }

    /// Set the pruned directory names.
    #[must_use]
    pub fn with_exclude_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Emit files only.
    #[must_use]
    pub fn with_files_only(mut self, files_only: bool) -> Self {
        self.files_only = files_only;
        self
    }

    /// Emit directories only.
    #[must_use]
    pub fn with_folders_only(mut self, folders_only: bool) -> Self {
        self.folders_only = folders_only;
        self
    }
}

/// Errors that can occur during directory scanning.
///
/// Any of these aborts the walk; partial results are discarded.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing a file or directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error raised while accessing `path`.
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// The path that triggered the error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(path) | Self::NotFound(path) => path,
            Self::Io { path, .. } => path,
        }
    }
}
