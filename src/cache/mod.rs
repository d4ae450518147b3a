//! Result caching module for fs-search.
//!
//! This module persists the results of directory walks so that repeating a
//! search over an unchanged tree does not walk it again.
//!
//! # Architecture
//!
//! The caching system is split into three components:
//!
//! * [`key`]: Derives a SHA-256 [`CacheKey`] from the search parameters.
//! * [`entry`]: Defines the [`CacheEntry`] stored per key.
//! * [`store`]: Loads, saves, clears and validates the JSON cache file.
//!
//! # Cache Invalidation
//!
//! An entry is reused only while the modification time of the base path
//! equals the one recorded when the entry was written. Entries never expire
//! by age. They are dropped when stale, when a forced refresh invalidates
//! their key, or when the whole cache is cleared.
//!
//! The base path's modification time changes when its direct children are
//! added, removed or renamed. Changes deeper in the tree do not touch it and
//! therefore do not invalidate cached results.

pub mod entry;
pub mod key;
pub mod store;

pub use entry::{CacheEntry, CacheMap};
pub use key::CacheKey;
pub use store::{CacheError, CacheResult, CacheStore};
