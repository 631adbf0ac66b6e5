//! Password digest computation
//!
//! A digest is the SHA-256 of the UTF-8 password bytes, rendered as 64
//! lowercase hex characters. There is no salt and comparison is plain string
//! equality; stored digests from earlier deployments stay valid only as long
//! as this stays unchanged.

use sha2::{Digest, Sha256};
use std::fmt;

/// Hex length of a SHA-256 digest
pub const DIGEST_HEX_LEN: usize = 64;

/// One-way digest of a password
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Digest a plaintext password
    pub fn compute(password: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Wrap a digest read back from storage
    pub fn from_stored(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact comparison against a freshly computed digest
    pub fn matches(&self, other: &PasswordDigest) -> bool {
        self.0 == other.0
    }
}

// Debug shows an 8-char prefix only.
impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "PasswordDigest({}…)", prefix)
    }
}
