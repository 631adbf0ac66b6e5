//! Product catalog operations.

#![allow(clippy::result_large_err)]

use super::elapsed_ms;
use credstore_core::errors::ExError;
use credstore_core::model::Product;
use credstore_core::repository::ProductRepository;
use credstore_core::rules::validation::parse_product_fields;
use credstore_core::{log_op_end, log_op_error, log_op_start};
use credstore_store::errors::Result;
use std::time::Instant;

pub struct ProductCatalog {
    products: Box<dyn ProductRepository>,
}

impl std::fmt::Debug for ProductCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductCatalog").finish_non_exhaustive()
    }
}

impl ProductCatalog {
    pub fn new(products: Box<dyn ProductRepository>) -> Self {
        Self { products }
    }

    /// Validate raw form fields and store the product
    ///
    /// ## Errors
    ///
    /// - `InvalidProductName`: blank name
    /// - `InvalidQuantity`: not a non-negative integer
    /// - `InvalidPrice`: not a number above zero
    /// - internal kinds on storage faults
    pub fn register_product(&self, name: &str, quantity: &str, price: &str) -> Result<Product> {
        log_op_start!("register_product");
        let start = Instant::now();

        let product = parse_product_fields(name, quantity, price)
            .map_err(|e| ExError::from(e).with_op("register_product"))
            .and_then(|new| self.products.insert_product(&new))
            .map_err(|e| {
                log_op_error!(
                    "register_product",
                    e.clone(),
                    duration_ms = elapsed_ms(start)
                );
                e
            })?;

        log_op_end!(
            "register_product",
            duration_ms = elapsed_ms(start),
            product_id = product.id
        );
        Ok(product)
    }

    /// All products, newest first
    ///
    /// ## Errors
    ///
    /// Internal kinds on storage faults.
    pub fn list_products(&self) -> Result<Vec<Product>> {
        log_op_start!("list_products");
        let start = Instant::now();

        let products = self.products.list_products().map_err(|e| {
            log_op_error!("list_products", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

        log_op_end!(
            "list_products",
            duration_ms = elapsed_ms(start),
            product_count = products.len()
        );
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credstore_core::errors::ExErrorKind;
    use credstore_store::DocumentRepo;
    use tempfile::TempDir;

    fn setup_catalog() -> (ProductCatalog, TempDir) {
        let dir = TempDir::new().unwrap();
        let repo = DocumentRepo::open(dir.path()).unwrap();
        (ProductCatalog::new(Box::new(repo)), dir)
    }

    #[test]
    fn test_register_trims_and_parses() {
        let (catalog, _dir) = setup_catalog();
        let product = catalog
            .register_product("  Caderno ", " 12 ", " 15.5 ")
            .unwrap();

        assert_eq!(product.name, "Caderno");
        assert_eq!(product.quantity, 12);
        assert_eq!(product.price_display(), "R$ 15,50");
    }

    #[test]
    fn test_invalid_fields_not_stored() {
        let (catalog, _dir) = setup_catalog();

        let err = catalog.register_product("Caneta", "-1", "2.0").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidQuantity);

        let err = catalog.register_product("Caneta", "1", "0").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidPrice);

        assert!(catalog.list_products().unwrap().is_empty());
    }
}
