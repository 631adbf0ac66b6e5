//! credstore Core - domain model and contracts for the credential store
//!
//! This crate provides:
//! - User and product models, password digests
//! - Validation rules for credentials and product fields
//! - The `UserRepository` / `ProductRepository` persistence seams
//! - Canonical error facility (`ExError`) and domain errors
//! - Structured logging facility
//! - Store configuration

pub mod config;
pub mod digest;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod repository;
pub mod rules;

pub use credstore_core_types as core_types;

// Re-export commonly used types
pub use config::{BackendKind, CredentialPolicy, LogFormat, StoreConfig};
pub use digest::PasswordDigest;
pub use errors::{CredstoreError, ExError, ExErrorKind, Result};
pub use model::{NewProduct, Product, UserRecord};
pub use repository::{ProductRepository, UserRepository};
