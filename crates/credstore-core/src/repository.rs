//! Persistence seams for the credential store and product catalog
//!
//! Each backend implements both traits. Implementations must rely on the
//! storage layer to reject duplicate usernames atomically; a separate
//! existence check before the insert is not acceptable.

#![allow(clippy::result_large_err)]

use crate::digest::PasswordDigest;
use crate::errors::ExError;
use crate::model::{NewProduct, Product, UserRecord};

/// Storage of username/digest records
pub trait UserRepository: Send + Sync {
    /// Short backend name for log fields
    fn backend_name(&self) -> &'static str;

    /// Insert a new record
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::UsernameTaken` if the username already exists,
    /// or an internal kind (`Persistence`, `Io`, ...) on storage faults.
    fn insert_user(&self, record: &UserRecord) -> Result<(), ExError>;

    /// Stored digest for `username`, `None` when unknown
    ///
    /// # Errors
    ///
    /// Returns an internal kind on storage faults.
    fn find_digest(&self, username: &str) -> Result<Option<PasswordDigest>, ExError>;

    /// Up to `limit` usernames starting with `prefix`, in ascending byte order
    ///
    /// The match is case-sensitive and treats every character of `prefix`
    /// literally.
    ///
    /// # Errors
    ///
    /// Returns an internal kind on storage faults.
    fn usernames_with_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>, ExError>;
}

/// Storage of product records
pub trait ProductRepository: Send + Sync {
    /// Insert a product, letting the store assign id and timestamp
    ///
    /// # Errors
    ///
    /// Returns an internal kind on storage faults.
    fn insert_product(&self, product: &NewProduct) -> Result<Product, ExError>;

    /// All products, newest first
    ///
    /// # Errors
    ///
    /// Returns an internal kind on storage faults.
    fn list_products(&self) -> Result<Vec<Product>, ExError>;
}
