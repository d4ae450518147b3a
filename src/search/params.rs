//! Search parameters.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::SearchError;
use crate::scanner::{normalize_extension, validate_base_path, AbsolutePath, WalkerConfig};

/// Everything that determines the outcome of a walk, and therefore its cache
/// key.
///
/// Extension filters are normalized to dotted form and both exclusion sets are
/// kept sorted, so parameters that mean the same thing compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParameters {
    base_path: AbsolutePath,
    exclude_extensions: BTreeSet<String>,
    exclude_dirs: BTreeSet<String>,
    files_only: bool,
    folders_only: bool,
}

impl SearchParameters {
    /// Build parameters for an already resolved base path.
    ///
    /// The mode flags are stored as given. Conflicting flags are rejected by
    /// [`SearchService::search`](super::SearchService::search).
    #[must_use]
    pub fn new<E, D>(
        base_path: AbsolutePath,
        exclude_extensions: E,
        exclude_dirs: D,
        files_only: bool,
        folders_only: bool,
    ) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            base_path,
            exclude_extensions: exclude_extensions
                .into_iter()
                .map(|e| normalize_extension(e.as_ref()))
                .collect(),
            exclude_dirs: exclude_dirs.into_iter().map(Into::into).collect(),
            files_only,
            folders_only,
        }
    }

    /// Check the mode flags, then resolve `raw_base` and build parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::ConflictingMode`] before touching the filesystem
    /// if both flags are set, and [`SearchError::PathNotFound`] if the base
    /// path does not exist.
    pub fn resolve<E, D>(
        raw_base: impl AsRef<Path>,
        exclude_extensions: E,
        exclude_dirs: D,
        files_only: bool,
        folders_only: bool,
    ) -> Result<Self, SearchError>
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        ensure_compatible_modes(files_only, folders_only)?;
        let base_path = validate_base_path(raw_base)?;
        Ok(Self::new(
            base_path,
            exclude_extensions,
            exclude_dirs,
            files_only,
            folders_only,
        ))
    }

    /// Root of the walk.
    #[must_use]
    pub fn base_path(&self) -> &AbsolutePath {
        &self.base_path
    }

    /// Dotted extensions excluded from the results.
    #[must_use]
    pub fn exclude_extensions(&self) -> &BTreeSet<String> {
        &self.exclude_extensions
    }

    /// Directory names pruned from the walk.
    #[must_use]
    pub fn exclude_dirs(&self) -> &BTreeSet<String> {
        &self.exclude_dirs
    }

    /// Whether only files are emitted.
    #[must_use]
    pub fn files_only(&self) -> bool {
        self.files_only
    }

    /// Whether only directories are emitted.
    #[must_use]
    pub fn folders_only(&self) -> bool {
        self.folders_only
    }

    /// Walker configuration equivalent to these parameters.
    #[must_use]
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            exclude_extensions: self.exclude_extensions.clone(),
            exclude_dirs: self.exclude_dirs.clone(),
            files_only: self.files_only,
            folders_only: self.folders_only,
        }
    }
}

/// Reject `files_only` together with `folders_only`.
///
/// # Errors
///
/// Returns [`SearchError::ConflictingMode`] if both are set.
pub fn ensure_compatible_modes(files_only: bool, folders_only: bool) -> Result<(), SearchError> {
    if files_only && folders_only {
        return Err(SearchError::ConflictingMode);
    }
    Ok(())
}
