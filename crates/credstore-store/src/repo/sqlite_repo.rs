//! SQLite repository implementation
//!
//! Holds only the database path. Each call opens a connection, runs one
//! statement and drops the connection on every exit path.

#![allow(clippy::result_large_err)]

use crate::db;
use crate::errors::{from_rusqlite, io_error, username_taken, Result};
use crate::migrations::apply_migrations;
use chrono::NaiveDateTime;
use credstore_core::digest::PasswordDigest;
use credstore_core::errors::ExError;
use credstore_core::model::{NewProduct, Product, UserRecord, TIMESTAMP_FORMAT};
use credstore_core::repository::{ProductRepository, UserRepository};
use rusqlite::{Connection, OptionalExtension, Row};
use std::path::PathBuf;

/// SQLite repository for users and products
#[derive(Debug, Clone)]
pub struct SqliteRepo {
    path: PathBuf,
}

impl SqliteRepo {
    /// Open (creating if needed) the database file and bring its schema up to date
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
        }

        let mut conn = db::open(&path)?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;

        tracing::debug!(path = %path.display(), "sqlite store ready");
        Ok(Self { path })
    }

    fn connect(&self) -> Result<Connection> {
        db::open(&self.path)
    }
}

/// True when the failure is the `users.username` UNIQUE constraint
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    let registered_at: String = row.get(4)?;
    let registered_at = NaiveDateTime::parse_from_str(&registered_at, TIMESTAMP_FORMAT)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        price: row.get(3)?,
        registered_at,
    })
}

impl UserRepository for SqliteRepo {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn insert_user(&self, record: &UserRecord) -> std::result::Result<(), ExError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO users (username, password) VALUES (?1, ?2)",
            rusqlite::params![record.username, record.password_digest.as_str()],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                username_taken("sqlite_insert_user", &record.username)
            } else {
                from_rusqlite(e)
            }
        })?;

        Ok(())
    }

    fn find_digest(&self, username: &str) -> std::result::Result<Option<PasswordDigest>, ExError> {
        let conn = self.connect()?;
        let stored: Option<String> = conn
            .query_row(
                "SELECT password FROM users WHERE username = ?1",
                [username],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)?;

        Ok(stored.map(PasswordDigest::from_stored))
    }

    fn usernames_with_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> std::result::Result<Vec<String>, ExError> {
        let conn = self.connect()?;
        // substr/length compare characters exactly; LIKE would fold ASCII case
        // and treat % and _ as wildcards.
        let mut stmt = conn
            .prepare(
                "SELECT username FROM users
                 WHERE substr(username, 1, length(?1)) = ?1
                 ORDER BY username
                 LIMIT ?2",
            )
            .map_err(from_rusqlite)?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let names = stmt
            .query_map(rusqlite::params![prefix, limit], |row| row.get(0))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(from_rusqlite)?;

        Ok(names)
    }
}

impl ProductRepository for SqliteRepo {
    fn insert_product(&self, product: &NewProduct) -> std::result::Result<Product, ExError> {
        let conn = self.connect()?;
        let inserted = conn
            .query_row(
                "INSERT INTO produtos (nome, quantidade, preco) VALUES (?1, ?2, ?3)
                 RETURNING id, nome, quantidade, preco, data_cadastro",
                rusqlite::params![product.name, product.quantity, product.price],
                product_from_row,
            )
            .map_err(from_rusqlite)?;

        Ok(inserted)
    }

    fn list_products(&self) -> std::result::Result<Vec<Product>, ExError> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, nome, quantidade, preco, data_cadastro FROM produtos
                 ORDER BY data_cadastro DESC, id DESC",
            )
            .map_err(from_rusqlite)?;

        let products = stmt
            .query_map([], product_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(products)
    }
}
