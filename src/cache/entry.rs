//! Cache entry definitions.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CacheKey;

/// In-memory form of the whole cache file.
pub type CacheMap = BTreeMap<CacheKey, CacheEntry>;

/// Results of one walk, tagged with the base path's modification time at the
/// time of the walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Modification time of the base path, in nanoseconds since the UNIX
    /// epoch.
    pub modification_time: i64,
    /// Matched paths in walk order.
    pub results: Vec<String>,
    /// When the entry was written. Absent in files written without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    /// Create an entry stamped with the current time.
    #[must_use]
    pub fn new(modification_time: i64, results: Vec<String>) -> Self {
        Self {
            modification_time,
            results,
            stored_at: Some(Utc::now()),
        }
    }

    /// Whether the entry was recorded for the given modification time.
    #[must_use]
    pub fn matches_mtime(&self, modification_time: i64) -> bool {
        self.modification_time == modification_time
    }
}
