//! Atomic write primitives
//!
//! Bytes are staged in a temp file next to the target first, so readers only
//! ever see complete documents.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Distinguishes staging files of concurrent writers within one process
static STAGE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Outcome of an exclusive create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

fn temp_path_for(target_path: &Path) -> PathBuf {
    let name = target_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let seq = STAGE_SEQ.fetch_add(1, Ordering::Relaxed);
    target_path.with_file_name(format!(".{}.{}.{}.tmp", name, std::process::id(), seq))
}

fn stage(target_path: &Path, content: &[u8]) -> Result<PathBuf> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_document_dir", e))?;
    }

    let temp_path = temp_path_for(target_path);
    fs::write(&temp_path, content).map_err(|e| io_error("write_document_temp", e))?;
    Ok(temp_path)
}

/// Atomically create a file that must not exist yet
///
/// Uses temp file + hard link: the link either publishes the complete
/// document or fails with `AlreadyExists`, with no window in between.
pub fn create_exclusive(target_path: &Path, content: &[u8]) -> Result<CreateOutcome> {
    let temp_path = stage(target_path, content)?;
    let linked = fs::hard_link(&temp_path, target_path);
    // temp file is removed on every path; a leftover only wastes space
    let _ = fs::remove_file(&temp_path);

    match linked {
        Ok(()) => Ok(CreateOutcome::Created),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(CreateOutcome::AlreadyExists),
        Err(e) => Err(io_error("link_document", e)),
    }
}

/// Whether a directory entry is a staging file
pub fn is_temp_file(path: &Path) -> bool {
    path.extension().map(|ext| ext == "tmp").unwrap_or(false)
}
