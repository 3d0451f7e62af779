//! Store handle lifecycle.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a busy timeout.
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// How long a statement waits on a locked store before failing.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

enum StoreLocation {
    File(PathBuf),
    Memory,
}

impl StoreLocation {
    fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }

    fn connect(&self) -> DbResult<Connection> {
        match self {
            Self::File(path) => Connection::open(path).map_err(|source| DbError::Open {
                path: path.clone(),
                source,
            }),
            Self::Memory => Ok(Connection::open_in_memory()?),
        }
    }
}

/// Opens (creating if needed) the store file at `path` and migrates it.
///
/// # Errors
/// - `DbError::Open` naming `path` when SQLite cannot open the file.
/// - `DbError::Migration` / `DbError::UnsupportedSchemaVersion` from bootstrap.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_store(StoreLocation::File(path.as_ref().to_path_buf()))
}

/// Opens a private in-memory store and applies all migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_store(StoreLocation::Memory)
}

/// Closes a store handle, surfacing any error SQLite reports on close.
pub fn close_db(conn: Connection) -> DbResult<()> {
    conn.close().map_err(|(_conn, source)| {
        error!("event=db_close module=db status=error error={source}");
        DbError::Close(source)
    })?;
    info!("event=db_close module=db status=ok");
    Ok(())
}

fn open_store(location: StoreLocation) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = location.mode();
    info!("event=db_open module=db status=start mode={mode}");

    let result = location.connect().and_then(|mut conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        apply_migrations(&mut conn)?;
        Ok(conn)
    });

    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!("event=db_open module=db status=ok mode={mode} duration_ms={duration_ms}"),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={duration_ms} error={err}"
        ),
    }
    result
}
