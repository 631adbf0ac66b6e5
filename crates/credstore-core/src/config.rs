//! Store configuration
//!
//! A `StoreConfig` is built once at startup (defaults, then an optional TOML
//! file, then command-line overrides) and handed to the store constructor.
//!
//! ```toml
//! backend = "sqlite"
//! database_path = "users.db"
//! min_username_length = 3
//! min_password_length = 5
//! ```

use crate::errors::{CredstoreError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE_PATH: &str = "users.db";
pub const DEFAULT_DOCUMENT_ROOT: &str = "credstore-docs";
pub const DEFAULT_MIN_USERNAME_LENGTH: usize = 3;
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 5;
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Which persistence backend serves the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Embedded SQLite database file
    #[default]
    Sqlite,
    /// Directory of JSON documents, one per record
    Document,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Sqlite => "sqlite",
            BackendKind::Document => "document",
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = CredstoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sqlite" => Ok(BackendKind::Sqlite),
            "document" => Ok(BackendKind::Document),
            other => Err(CredstoreError::InvalidConfig {
                reason: format!("unknown backend '{}'", other),
            }),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = CredstoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(CredstoreError::InvalidConfig {
                reason: format!("unknown log format '{}'", other),
            }),
        }
    }
}

/// Minimum credential lengths, counted in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialPolicy {
    pub min_username_length: usize,
    pub min_password_length: usize,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            min_username_length: DEFAULT_MIN_USERNAME_LENGTH,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub backend: BackendKind,
    pub database_path: PathBuf,
    pub document_root: PathBuf,
    pub min_username_length: usize,
    pub min_password_length: usize,
    pub search_limit: usize,
    pub log_format: LogFormat,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            document_root: PathBuf::from(DEFAULT_DOCUMENT_ROOT),
            min_username_length: DEFAULT_MIN_USERNAME_LENGTH,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            search_limit: DEFAULT_SEARCH_LIMIT,
            log_format: LogFormat::default(),
        }
    }
}

impl StoreConfig {
    /// Parse a TOML document; absent keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on malformed TOML, unknown keys or values out
    /// of range.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: StoreConfig =
            toml::from_str(text).map_err(|e| CredstoreError::InvalidConfig {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigLoad` if the file cannot be read, otherwise the
    /// errors of [`StoreConfig::from_toml_str`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CredstoreError::ConfigLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` when `search_limit` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.search_limit == 0 {
            return Err(CredstoreError::InvalidConfig {
                reason: "search_limit must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn credential_policy(&self) -> CredentialPolicy {
        CredentialPolicy {
            min_username_length: self.min_username_length,
            min_password_length: self.min_password_length,
        }
    }
}
