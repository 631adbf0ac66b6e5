//! Repository layer persisting users and products to SQLite

pub mod sqlite_repo;

pub use sqlite_repo::SqliteRepo;
