//! Cached directory search.
//!
//! This module ties the [`scanner`](crate::scanner) and
//! [`cache`](crate::cache) modules together:
//!
//! * [`params`]: Immutable [`SearchParameters`] that fully determine a walk.
//! * [`service`]: [`SearchService`], which decides between returning cached
//!   results and walking the tree again.
//!
//! # Example
//!
//! ```no_run
//! use fs_search::cache::CacheStore;
//! use fs_search::search::{SearchOptions, SearchParameters, SearchService};
//!
//! let params = SearchParameters::resolve(".", ["log"], ["node_modules"], true, false)?;
//! let service = SearchService::new(CacheStore::new("/tmp/fs-search-cache.json"));
//!
//! let outcome = service.search(&params, SearchOptions::default())?;
//! println!("{} results ({})", outcome.results.len(), outcome.status);
//! # Ok::<(), fs_search::error::SearchError>(())
//! ```

pub mod params;
pub mod service;

pub use params::{ensure_compatible_modes, SearchParameters};
pub use service::{CacheStatus, SearchOptions, SearchOutcome, SearchService};
