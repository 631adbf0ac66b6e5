//! credstore Engine - service layer
//!
//! Coordinates validation rules from credstore-core with the repositories of
//! credstore-store, and owns operation lifecycle logging.

pub mod commands;
pub mod services;

pub use commands::catalog::ProductCatalog;
pub use commands::credentials::{CredentialStore, RegistrationForm};
pub use services::Services;
