//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory tree
//! and collecting the paths that survive the configured exclusions.
//! Traversal is single-threaded and depth-first; children are visited in
//! file-name order so the output is deterministic for a given tree.
//!
//! # Filtering
//!
//! - Directories whose name is in `exclude_dirs` are pruned: neither they nor
//!   anything beneath them is visited.
//! - Files whose dotted suffix is in `exclude_extensions` are skipped.
//! - `files_only` suppresses directory entries, `folders_only` suppresses files.
//!
//! Symbolic links are not followed. A link that points at a directory is
//! treated as a directory entry (emitted and pruned by name) but is never
//! descended into.
//!
//! # Example
//!
//! ```no_run
//! use fs_search::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig::default().with_exclude_dirs([".git", "target"]);
//! let walker = Walker::new(Path::new("."), config);
//! let paths = walker.walk()?;
//! println!("Found {} entries", paths.len());
//! # Ok::<(), fs_search::scanner::ScanError>(())
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::{DirEntry, WalkDir};

use super::path_utils::dotted_suffix;
use super::{ScanError, WalkerConfig};
use crate::progress::ProgressCallback;

/// Directory walker for path discovery.
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional observer notified once per emitted entry
    progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for Walker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker")
            .field("root", &self.root)
            .field("config", &self.config)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to walk
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
            progress_callback: None,
        }
    }

    /// Set the progress callback.
    ///
    /// The callback is invoked synchronously for every emitted entry. It only
    /// observes the walk and has no influence on the results.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Walk the directory tree and collect matching paths.
    ///
    /// The root itself is never part of the output.
    ///
    /// # Errors
    ///
    /// The first filesystem error aborts the walk and is returned as a
    /// [`ScanError`] naming the offending path. Entries collected up to that
    /// point are discarded.
    pub fn walk(&self) -> Result<Vec<String>, ScanError> {
        if let Some(ref callback) = self.progress_callback {
            callback.on_phase_start("walking", 0);
        }

        let result = self.collect();

        if let Some(ref callback) = self.progress_callback {
            callback.on_phase_end("walking");
        }

        match result {
            Ok(paths) => {
                log::debug!(
                    "Walk of {} produced {} entries",
                    self.root.display(),
                    paths.len()
                );
                Ok(paths)
            }
            Err(e) => {
                log::warn!("Walk of {} aborted: {}", self.root.display(), e);
                Err(e)
            }
        }
    }

    fn collect(&self) -> Result<Vec<String>, ScanError> {
        let mut results = Vec::new();

        let walk_dir = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        for entry_result in walk_dir {
            let entry = entry_result.map_err(|e| self.handle_walkdir_error(e))?;

            // Skip the root directory itself
            if entry.depth() == 0 {
                continue;
            }

            let emit = if is_dir_like(&entry) {
                !self.config.files_only
            } else {
                !self.config.folders_only && !self.is_excluded_extension(entry.path())
            };

            if !emit {
                log::trace!("Skipping: {}", entry.path().display());
                continue;
            }

            let path = entry.path().to_string_lossy().into_owned();
            if let Some(ref callback) = self.progress_callback {
                callback.on_progress(results.len() + 1, &path);
            }
            results.push(path);
        }

        Ok(results)
    }

    /// Check whether a directory entry is excluded by name.
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || self.config.exclude_dirs.is_empty() || !is_dir_like(entry) {
            return false;
        }

        let pruned = entry
            .file_name()
            .to_str()
            .is_some_and(|name| self.config.exclude_dirs.contains(name));

        if pruned {
            log::trace!("Pruning directory: {}", entry.path().display());
        }
        pruned
    }

    /// Check if a file's extension is in the exclusion set.
    fn is_excluded_extension(&self, path: &Path) -> bool {
        if self.config.exclude_extensions.is_empty() {
            return false;
        }
        dotted_suffix(path).is_some_and(|suffix| self.config.exclude_extensions.contains(&suffix))
    }

    /// Convert a walkdir error into a [`ScanError`].
    fn handle_walkdir_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        match error.into_io_error() {
            Some(io_error) => ScanError::from_io(&path, io_error),
            None => ScanError::Io {
                path,
                source: std::io::Error::other("filesystem loop detected"),
            },
        }
    }
}

/// Directories and symlinks to directories count as folders.
fn is_dir_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir())
}
