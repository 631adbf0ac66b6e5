//! Sharding logic for document collections
//!
//! User documents are keyed by the SHA-256 of the username (usernames may
//! hold characters no filesystem accepts) and sharded into subdirectories by
//! the first 2 hex characters of that key.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Hex SHA-256 of a username, used as its document key
pub fn document_key(username: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compute the shard path for a given key
///
/// For key "abc123...", returns "<root>/ab/abc123.json"
pub fn shard_path(root: &Path, key: &str) -> PathBuf {
    let shard = &key[..2.min(key.len())];

    root.join(shard).join(format!("{}.json", key))
}
