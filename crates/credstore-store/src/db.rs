//! Database connection management
//!
//! Every repository call opens its own connection through [`open`] and drops
//! it before returning.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Upper bound on waiting for another writer's lock
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(2);

/// Open a SQLite database at the given path with the busy timeout applied
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let conn = Connection::open(path).map_err(from_rusqlite)?;
    conn.busy_timeout(BUSY_TIMEOUT).map_err(from_rusqlite)?;
    Ok(conn)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a freshly created database file
pub fn configure(conn: &Connection) -> Result<()> {
    // WAL keeps readers from blocking on the single writer
    let _mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .map_err(from_rusqlite)?;

    Ok(())
}
