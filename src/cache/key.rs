//! Cache key derivation.
//!
//! A [`CacheKey`] is the SHA-256 digest of a canonical byte encoding of
//! [`SearchParameters`]. The encoding tags every field, length-prefixes every
//! string and counts every set, so two different parameter sets can never
//! produce the same byte sequence. Exclusion sets are already held in sorted
//! order, which makes the key independent of the order filters were given in.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::search::SearchParameters;

/// Version tag mixed into every key. Bump when the encoding changes so old
/// entries can never alias new ones.
const KEY_FORMAT: &[u8] = b"fs-search/cache-key/v1";

/// Fixed-width fingerprint of a set of search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for `params`.
    #[must_use]
    pub fn derive(params: &SearchParameters) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(KEY_FORMAT);

        write_field(
            &mut hasher,
            b"base_path",
            params.base_path().as_path().as_os_str().as_encoded_bytes(),
        );
        write_set(
            &mut hasher,
            b"exclude_extensions",
            params.exclude_extensions().iter().map(String::as_str),
        );
        write_set(
            &mut hasher,
            b"exclude_dirs",
            params.exclude_dirs().iter().map(String::as_str),
        );
        write_field(&mut hasher, b"files_only", &[u8::from(params.files_only())]);
        write_field(&mut hasher, b"folders_only", &[u8::from(params.folders_only())]);

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Hex representation of the digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn write_len(hasher: &mut Sha256, len: usize) {
    hasher.update((len as u64).to_le_bytes());
}

fn write_field(hasher: &mut Sha256, tag: &[u8], value: &[u8]) {
    write_len(hasher, tag.len());
    hasher.update(tag);
    write_len(hasher, value.len());
    hasher.update(value);
}

fn write_set<'a>(hasher: &mut Sha256, tag: &[u8], items: impl ExactSizeIterator<Item = &'a str>) {
    write_len(hasher, tag.len());
    hasher.update(tag);
    write_len(hasher, items.len());
    for item in items {
        write_len(hasher, item.len());
        hasher.update(item.as_bytes());
    }
}
