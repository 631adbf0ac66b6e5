//! Document repository
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/users/<k0k1>/<key>.json     {"username": "...", "password": "<digest>"}
//! <root>/produtos/<id>.json          {"id": 1, "nome": "...", "quantidade": 3,
//!                                     "preco": 2.5, "data_cadastro": "..."}
//! ```
//!
//! Uniqueness comes from exclusive creation of the document file; nothing is
//! ever looked up before being written.

#![allow(clippy::result_large_err)]

use crate::document::atomic::{create_exclusive, is_temp_file, CreateOutcome};
use crate::document::sharding::{document_key, shard_path};
use crate::errors::{
    corrupt_document, document_collision, from_serde_json, io_error, username_taken, Result,
};
use chrono::NaiveDateTime;
use credstore_core::digest::PasswordDigest;
use credstore_core::errors::ExError;
use credstore_core::model::product::sort_newest_first;
use credstore_core::model::{NewProduct, Product, UserRecord, TIMESTAMP_FORMAT};
use credstore_core::repository::{ProductRepository, UserRepository};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const USERS_COLLECTION: &str = "users";
pub const PRODUCTS_COLLECTION: &str = "produtos";

/// Attempts at claiming a product id before giving up
const MAX_ID_ATTEMPTS: usize = 64;

#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    username: String,
    password: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ProductDocument {
    id: i64,
    nome: String,
    quantidade: i64,
    preco: f64,
    data_cadastro: String,
}

impl ProductDocument {
    fn into_product(self, path: &Path) -> Result<Product> {
        let registered_at = NaiveDateTime::parse_from_str(&self.data_cadastro, TIMESTAMP_FORMAT)
            .map_err(|e| corrupt_document(path, &e.to_string()))?;
        Ok(Product {
            id: self.id,
            name: self.nome,
            quantity: self.quantidade,
            price: self.preco,
            registered_at,
        })
    }
}

/// Filesystem-backed document repository for users and products
#[derive(Debug, Clone)]
pub struct DocumentRepo {
    root: PathBuf,
}

impl DocumentRepo {
    /// Open the repository, creating both collection directories if missing
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        for collection in [USERS_COLLECTION, PRODUCTS_COLLECTION] {
            fs::create_dir_all(root.join(collection))
                .map_err(|e| io_error("create_collection", e))?;
        }

        tracing::debug!(root = %root.display(), "document store ready");
        Ok(Self { root })
    }

    fn users_dir(&self) -> PathBuf {
        self.root.join(USERS_COLLECTION)
    }

    fn products_dir(&self) -> PathBuf {
        self.root.join(PRODUCTS_COLLECTION)
    }

    fn user_path(&self, username: &str) -> PathBuf {
        shard_path(&self.users_dir(), &document_key(username))
    }

    fn product_path(&self, id: i64) -> PathBuf {
        self.products_dir().join(format!("{}.json", id))
    }

    /// Read and parse one document; `None` if the file does not exist
    fn read_document<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("read_document", e)),
        };
        let doc = serde_json::from_slice(&bytes)
            .map_err(|e| corrupt_document(path, &e.to_string()))?;
        Ok(Some(doc))
    }

    /// JSON document files directly inside `dir`
    fn document_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("list_collection", e)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| io_error("list_collection", e))?.path();
            if path.is_file()
                && !is_temp_file(&path)
                && path.extension().map(|ext| ext == "json").unwrap_or(false)
            {
                files.push(path);
            }
        }
        Ok(files)
    }

    fn all_user_documents(&self) -> Result<Vec<(PathBuf, UserDocument)>> {
        let entries = match fs::read_dir(self.users_dir()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("list_collection", e)),
        };

        let mut docs = Vec::new();
        for entry in entries {
            let shard = entry.map_err(|e| io_error("list_collection", e))?.path();
            if !shard.is_dir() {
                continue;
            }
            for path in Self::document_files(&shard)? {
                if let Some(doc) = Self::read_document::<UserDocument>(&path)? {
                    docs.push((path, doc));
                }
            }
        }
        Ok(docs)
    }

    fn highest_product_id(&self) -> Result<i64> {
        let mut highest = 0;
        for path in Self::document_files(&self.products_dir())? {
            let id = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<i64>().ok());
            match id {
                Some(id) => highest = highest.max(id),
                None => tracing::debug!(path = %path.display(), "skipping foreign file"),
            }
        }
        Ok(highest)
    }
}

impl UserRepository for DocumentRepo {
    fn backend_name(&self) -> &'static str {
        "document"
    }

    fn insert_user(&self, record: &UserRecord) -> std::result::Result<(), ExError> {
        let path = self.user_path(&record.username);
        let doc = UserDocument {
            username: record.username.clone(),
            password: record.password_digest.as_str().to_string(),
        };
        let bytes = serde_json::to_vec(&doc).map_err(|e| from_serde_json("encode_user", e))?;

        match create_exclusive(&path, &bytes)? {
            CreateOutcome::Created => Ok(()),
            CreateOutcome::AlreadyExists => {
                let existing = Self::read_document::<UserDocument>(&path)?;
                match existing {
                    Some(existing) if existing.username != record.username => {
                        Err(document_collision(&document_key(&record.username)))
                    }
                    _ => Err(username_taken("document_insert_user", &record.username)),
                }
            }
        }
    }

    fn find_digest(&self, username: &str) -> std::result::Result<Option<PasswordDigest>, ExError> {
        let path = self.user_path(username);
        match Self::read_document::<UserDocument>(&path)? {
            Some(doc) if doc.username == username => {
                Ok(Some(PasswordDigest::from_stored(doc.password)))
            }
            Some(_) => Err(document_collision(&document_key(username))),
            None => Ok(None),
        }
    }

    fn usernames_with_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> std::result::Result<Vec<String>, ExError> {
        let mut names: Vec<String> = self
            .all_user_documents()?
            .into_iter()
            .map(|(_, doc)| doc.username)
            .filter(|name| name.starts_with(prefix))
            .collect();

        names.sort_unstable();
        names.truncate(limit);
        Ok(names)
    }
}

impl ProductRepository for DocumentRepo {
    fn insert_product(&self, product: &NewProduct) -> std::result::Result<Product, ExError> {
        let registered_at = chrono::Utc::now().naive_utc();
        let data_cadastro = registered_at.format(TIMESTAMP_FORMAT).to_string();
        let mut id = self.highest_product_id()? + 1;

        for _ in 0..MAX_ID_ATTEMPTS {
            let path = self.product_path(id);
            let doc = ProductDocument {
                id,
                nome: product.name.clone(),
                quantidade: product.quantity,
                preco: product.price,
                data_cadastro: data_cadastro.clone(),
            };
            let bytes =
                serde_json::to_vec(&doc).map_err(|e| from_serde_json("encode_product", e))?;

            match create_exclusive(&path, &bytes)? {
                CreateOutcome::Created => return doc.into_product(&path),
                // another writer claimed this id first
                CreateOutcome::AlreadyExists => id += 1,
            }
        }

        Err(io_error(
            "claim_product_id",
            io::Error::new(
                io::ErrorKind::WouldBlock,
                format!("no free product id after {} attempts", MAX_ID_ATTEMPTS),
            ),
        ))
    }

    fn list_products(&self) -> std::result::Result<Vec<Product>, ExError> {
        let mut products = Vec::new();
        for path in Self::document_files(&self.products_dir())? {
            if let Some(doc) = Self::read_document::<ProductDocument>(&path)? {
                products.push(doc.into_product(&path)?);
            }
        }

        sort_newest_first(&mut products);
        Ok(products)
    }
}
