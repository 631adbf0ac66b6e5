//! credstore Store - persistence backends for the credential store
//!
//! Provides:
//! - SQLite repository with an embedded migrations framework
//! - Document repository: one JSON document per record on the filesystem
//! - Backend selection from `StoreConfig`

pub mod backend;
pub mod db;
pub mod document;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use backend::{open_repositories, Repositories};
pub use document::DocumentRepo;
pub use errors::Result;
pub use repo::SqliteRepo;
