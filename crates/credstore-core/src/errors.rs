use thiserror::Error;

/// Result type alias using CredstoreError
pub type Result<T> = std::result::Result<T, CredstoreError>;

/// Text shown to the user in place of any internal failure detail
pub const GENERIC_INTERNAL_MESSAGE: &str = "Internal error, see the log for details";

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code and to one of two classes:
/// validation (the user can fix the input) or internal (storage and
/// environment faults).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Credential validation
    UsernameTooShort,
    PasswordTooShort,
    UsernameTaken,
    PasswordMismatch,

    // Product validation
    InvalidProductName,
    InvalidQuantity,
    InvalidPrice,

    // Configuration
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    CorruptDocument,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::UsernameTooShort => "ERR_USERNAME_TOO_SHORT",
            ExErrorKind::PasswordTooShort => "ERR_PASSWORD_TOO_SHORT",
            ExErrorKind::UsernameTaken => "ERR_USERNAME_TAKEN",
            ExErrorKind::PasswordMismatch => "ERR_PASSWORD_MISMATCH",
            ExErrorKind::InvalidProductName => "ERR_INVALID_PRODUCT_NAME",
            ExErrorKind::InvalidQuantity => "ERR_INVALID_QUANTITY",
            ExErrorKind::InvalidPrice => "ERR_INVALID_PRICE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::CorruptDocument => "ERR_CORRUPT_DOCUMENT",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the user can correct this error by changing the input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ExErrorKind::UsernameTooShort
                | ExErrorKind::PasswordTooShort
                | ExErrorKind::UsernameTaken
                | ExErrorKind::PasswordMismatch
                | ExErrorKind::InvalidProductName
                | ExErrorKind::InvalidQuantity
                | ExErrorKind::InvalidPrice
                | ExErrorKind::InvalidConfig
        )
    }
}

/// Canonical structured error type
///
/// Carries the classification used for programmatic handling plus the
/// context needed in the log. The message of an internal error may hold raw
/// storage-engine text, so callers showing errors to a user go through
/// [`ExError::user_message`].
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (a username or a product id)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Whether this is a user-correctable validation error
    pub fn is_validation(&self) -> bool {
        self.kind.is_validation()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Text safe to display to an end user
    ///
    /// Validation messages are returned verbatim; internal errors collapse
    /// to [`GENERIC_INTERNAL_MESSAGE`].
    pub fn user_message(&self) -> &str {
        if self.is_validation() {
            &self.message
        } else {
            GENERIC_INTERNAL_MESSAGE
        }
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for credential and product operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CredstoreError {
    // ===== Credential Validation =====
    /// Username shorter than the configured minimum
    #[error("username too short (minimum {min} characters)")]
    UsernameTooShort { min: usize },

    /// Password shorter than the configured minimum
    #[error("password too short (minimum {min} characters)")]
    PasswordTooShort { min: usize },

    /// Username already registered
    #[error("username taken")]
    UsernameTaken { username: String },

    /// Password and confirmation differ
    #[error("passwords do not match")]
    PasswordMismatch,

    // ===== Product Validation =====
    /// Product name missing or blank
    #[error("product name is required")]
    MissingProductName,

    /// Quantity is not a non-negative integer
    #[error("invalid quantity: {value:?}")]
    InvalidQuantity { value: String },

    /// Price is not a positive number
    #[error("invalid price: {value:?}")]
    InvalidPrice { value: String },

    // ===== Configuration =====
    /// Configuration value out of range
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Configuration file could not be read or parsed
    #[error("cannot load configuration from {path}: {reason}")]
    ConfigLoad { path: String, reason: String },
}

impl From<CredstoreError> for ExError {
    fn from(err: CredstoreError) -> Self {
        let message = err.to_string();
        match err {
            CredstoreError::UsernameTooShort { .. } => {
                ExError::new(ExErrorKind::UsernameTooShort).with_message(message)
            }
            CredstoreError::PasswordTooShort { .. } => {
                ExError::new(ExErrorKind::PasswordTooShort).with_message(message)
            }
            CredstoreError::UsernameTaken { username } => {
                ExError::new(ExErrorKind::UsernameTaken)
                    .with_entity_id(username)
                    .with_message(message)
            }
            CredstoreError::PasswordMismatch => {
                ExError::new(ExErrorKind::PasswordMismatch).with_message(message)
            }
            CredstoreError::MissingProductName => {
                ExError::new(ExErrorKind::InvalidProductName).with_message(message)
            }
            CredstoreError::InvalidQuantity { .. } => {
                ExError::new(ExErrorKind::InvalidQuantity).with_message(message)
            }
            CredstoreError::InvalidPrice { .. } => {
                ExError::new(ExErrorKind::InvalidPrice).with_message(message)
            }
            CredstoreError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig)
                    .with_op("load_config")
                    .with_message(message)
            }
            CredstoreError::ConfigLoad { path, .. } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("load_config")
                .with_entity_id(path)
                .with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_stable() {
        let cases = [
            (ExErrorKind::UsernameTooShort, "ERR_USERNAME_TOO_SHORT"),
            (ExErrorKind::PasswordTooShort, "ERR_PASSWORD_TOO_SHORT"),
            (ExErrorKind::UsernameTaken, "ERR_USERNAME_TAKEN"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
            (ExErrorKind::Internal, "ERR_INTERNAL"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_storage_kinds_are_internal() {
        for kind in [
            ExErrorKind::Io,
            ExErrorKind::Serialization,
            ExErrorKind::Persistence,
            ExErrorKind::CorruptDocument,
            ExErrorKind::Internal,
        ] {
            assert!(!kind.is_validation(), "{:?} must be internal", kind);
        }
    }

    #[test]
    fn test_user_message_hides_internal_detail() {
        let err = ExError::new(ExErrorKind::Persistence)
            .with_op("sqlite")
            .with_message("disk I/O error at page 7");

        assert_eq!(err.user_message(), GENERIC_INTERNAL_MESSAGE);
        assert!(err.to_string().contains("disk I/O error"));
    }

    #[test]
    fn test_user_message_keeps_validation_text() {
        let err: ExError = CredstoreError::UsernameTaken {
            username: "alice".to_string(),
        }
        .into();

        assert_eq!(err.kind(), ExErrorKind::UsernameTaken);
        assert_eq!(err.user_message(), "username taken");
        assert_eq!(err.entity_id(), Some("alice"));
    }

    #[test]
    fn test_display_format() {
        let err = ExError::new(ExErrorKind::UsernameTooShort)
            .with_op("register")
            .with_message("username too short (minimum 3 characters)");
        assert_eq!(
            err.to_string(),
            "[ERR_USERNAME_TOO_SHORT] in operation 'register': username too short (minimum 3 characters)"
        );
    }
}
