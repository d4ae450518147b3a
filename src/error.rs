//! Structured error handling and exit codes.

use std::path::PathBuf;

use serde::Serialize;

use crate::cache::CacheError;
use crate::scanner::ScanError;

/// Errors surfaced by a search.
///
/// Every variant is fatal for the invocation that raised it. A corrupt cache
/// file is the one failure that never shows up here: it is logged and treated
/// as an empty cache.
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    /// The base path does not resolve to an existing filesystem entry.
    #[error("Base path '{}' does not exist", .0.display())]
    PathNotFound(PathBuf),

    /// Both `files_only` and `folders_only` were requested.
    #[error("You cannot use --files-only and --folders-only together")]
    ConflictingMode,

    /// The directory walk failed part-way through.
    #[error("Error while searching: {0}")]
    Traversal(#[from] ScanError),

    /// The cache file could not be read or written.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Exit codes for the fs-search application.
///
/// - 0: Success (search completed, results printed or written)
/// - 1: General error (unexpected failure, traversal or cache I/O error)
/// - 2: Usage error (missing base path, conflicting mode flags)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: The search completed.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Usage error: The request could not be carried out as given.
    UsageError = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "FS000",
            Self::GeneralError => "FS001",
            Self::UsageError => "FS002",
        }
    }

    /// Pick the exit code for an application error.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<SearchError>() {
            Some(SearchError::PathNotFound(_) | SearchError::ConflictingMode) => Self::UsageError,
            _ => Self::GeneralError,
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "FS001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
        }
    }
}
