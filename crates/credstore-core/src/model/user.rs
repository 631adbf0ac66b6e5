use crate::digest::PasswordDigest;

/// A registered user as persisted by a repository
///
/// Holds only the digest; the plaintext password never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique, case-sensitive login name
    pub username: String,

    /// SHA-256 of the password, lowercase hex
    pub password_digest: PasswordDigest,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, password_digest: PasswordDigest) -> Self {
        Self {
            username: username.into(),
            password_digest,
        }
    }
}
