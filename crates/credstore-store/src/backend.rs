//! Backend selection
//!
//! Both backends implement the same two repository traits; the rest of the
//! system only ever sees the trait objects returned here.

#![allow(clippy::result_large_err)]

use crate::document::DocumentRepo;
use crate::errors::Result;
use crate::repo::SqliteRepo;
use credstore_core::config::{BackendKind, StoreConfig};
use credstore_core::repository::{ProductRepository, UserRepository};

/// The user and product repositories of one backend
pub struct Repositories {
    pub users: Box<dyn UserRepository>,
    pub products: Box<dyn ProductRepository>,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories")
            .field("backend", &self.users.backend_name())
            .finish()
    }
}

/// Open the backend named by `config.backend`
///
/// # Errors
///
/// Returns an internal error if the database file or document root cannot
/// be prepared.
pub fn open_repositories(config: &StoreConfig) -> Result<Repositories> {
    tracing::debug!(backend = config.backend.as_str(), "opening repositories");

    match config.backend {
        BackendKind::Sqlite => {
            let repo = SqliteRepo::open(&config.database_path)?;
            Ok(Repositories {
                users: Box::new(repo.clone()),
                products: Box::new(repo),
            })
        }
        BackendKind::Document => {
            let repo = DocumentRepo::open(&config.document_root)?;
            Ok(Repositories {
                users: Box::new(repo.clone()),
                products: Box::new(repo),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_for(backend: BackendKind, dir: &TempDir) -> StoreConfig {
        StoreConfig {
            backend,
            database_path: dir.path().join("users.db"),
            document_root: dir.path().join("docs"),
            ..StoreConfig::default()
        }
    }

    #[test]
    fn test_sqlite_backend_selected() {
        let dir = TempDir::new().unwrap();
        let repos = open_repositories(&config_for(BackendKind::Sqlite, &dir)).unwrap();

        assert_eq!(repos.users.backend_name(), "sqlite");
        assert!(dir.path().join("users.db").exists());
        assert!(!dir.path().join("docs").exists());
    }

    #[test]
    fn test_document_backend_selected() {
        let dir = TempDir::new().unwrap();
        let repos = open_repositories(&config_for(BackendKind::Document, &dir)).unwrap();

        assert_eq!(repos.users.backend_name(), "document");
        assert!(dir.path().join("docs").join("users").is_dir());
        assert!(!dir.path().join("users.db").exists());
    }

    #[test]
    fn test_debug_names_backend() {
        let dir = TempDir::new().unwrap();
        let repos = open_repositories(&config_for(BackendKind::Document, &dir)).unwrap();
        assert!(format!("{:?}", repos).contains("document"));
    }
}
