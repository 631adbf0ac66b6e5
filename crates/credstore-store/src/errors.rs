//! Error handling for credstore-store
//!
//! Wraps credstore-core ExError with store-specific helpers

use credstore_core::errors::{CredstoreError, ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error for an already applied migration
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

/// Duplicate username rejected by the storage layer
pub fn username_taken(op: &str, username: &str) -> ExError {
    ExError::from(CredstoreError::UsernameTaken {
        username: username.to_string(),
    })
    .with_op(op.to_string())
}

/// Two different records mapped to the same document key
pub fn document_collision(key: &str) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("document_write")
        .with_message(format!("Document key collision for {}", key))
}

/// A stored document could not be understood
pub fn corrupt_document(path: &std::path::Path, reason: &str) -> ExError {
    ExError::new(ExErrorKind::CorruptDocument)
        .with_op("document_read")
        .with_entity_id(path.display().to_string())
        .with_message(reason.to_string())
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create a serialization error from serde_json::Error
pub fn from_serde_json(operation: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
