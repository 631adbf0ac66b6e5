//! Configuration resolution
//!
//! Defaults, then the optional TOML file, then command-line flags.

use clap::Args;
use credstore_core::config::{BackendKind, LogFormat, StoreConfig};
use credstore_core::errors::Result;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Storage backend: sqlite or document
    #[arg(long, global = true)]
    pub backend: Option<BackendKind>,

    /// SQLite database file
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Root directory of the document store
    #[arg(long, global = true, value_name = "DIR")]
    pub document_root: Option<PathBuf>,

    /// Log output format: pretty or json
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,
}

/// Build the effective configuration
///
/// # Errors
///
/// Returns `ConfigLoad` / `InvalidConfig` when the file is unreadable or
/// out of range.
pub fn resolve(args: &GlobalArgs) -> Result<StoreConfig> {
    let mut config = match &args.config {
        Some(path) => StoreConfig::from_file(path)?,
        None => StoreConfig::default(),
    };

    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    if let Some(path) = &args.database {
        config.database_path = path.clone();
    }
    if let Some(dir) = &args.document_root {
        config.document_root = dir.clone();
    }
    if let Some(format) = args.log_format {
        config.log_format = format;
    }

    config.validate()?;
    Ok(config)
}
