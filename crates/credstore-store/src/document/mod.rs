//! Filesystem document store
//!
//! Stands in for a remote document database. Provides:
//! - One JSON document per record, grouped in collection directories
//! - Atomic publish (no partially written documents are ever visible)
//! - Exclusive create, so an existing key is never overwritten
//! - Sharding of user documents by the first 2 hex chars of their key

mod atomic;
mod doc_repo;
mod sharding;

pub use doc_repo::{DocumentRepo, PRODUCTS_COLLECTION, USERS_COLLECTION};
