//! Service wiring
//!
//! Builds the credential store and product catalog once at startup from a
//! validated `StoreConfig`. Callers own the returned `Services` and pass it
//! down; nothing here is global.

#![allow(clippy::result_large_err)]

use crate::commands::catalog::ProductCatalog;
use crate::commands::credentials::CredentialStore;
use crate::commands::elapsed_ms;
use credstore_core::config::StoreConfig;
use credstore_core::errors::ExError;
use credstore_core::{log_op_end, log_op_error, log_op_start};
use credstore_store::errors::Result;
use credstore_store::{open_repositories, Repositories};
use std::time::Instant;

#[derive(Debug)]
pub struct Services {
    pub credentials: CredentialStore,
    pub catalog: ProductCatalog,
}

impl Services {
    /// Validate `config` and open the configured backend
    ///
    /// ## Errors
    ///
    /// - `InvalidConfig`: configuration out of range
    /// - internal kinds if the backend cannot be opened
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let backend = config.backend.as_str();
        log_op_start!("open_services", backend = backend);
        let start = Instant::now();

        let repos = Self::open_impl(config).map_err(|e| {
            log_op_error!(
                "open_services",
                e.clone(),
                duration_ms = elapsed_ms(start),
                backend = backend
            );
            e
        })?;

        log_op_end!(
            "open_services",
            duration_ms = elapsed_ms(start),
            backend = backend
        );
        Ok(Self {
            credentials: CredentialStore::new(
                repos.users,
                config.credential_policy(),
                config.search_limit,
            ),
            catalog: ProductCatalog::new(repos.products),
        })
    }

    fn open_impl(config: &StoreConfig) -> Result<Repositories> {
        config
            .validate()
            .map_err(|e| ExError::from(e).with_op("open_services"))?;
        open_repositories(config)
    }
}
