//! Schema versions for the client store.
//!
//! # Invariants
//! - `version` values are strictly increasing.
//! - The store's `PRAGMA user_version` equals the last applied version.
//! - Migrations tolerate store files that already carry the `clients` table.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_clients.sql"),
}];

/// Outcome of one `apply_migrations` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub from_version: u32,
    pub to_version: u32,
    /// Versions applied by this call, in order. Empty when already current.
    pub applied: Vec<u32>,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Reads the schema version recorded in the store.
pub fn current_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings the store up to `latest_version()`.
///
/// All pending steps run in one transaction: either every step lands or the
/// store is left at its starting version.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<MigrationReport> {
    let from_version = current_version(conn)?;
    let target_version = latest_version();
    if from_version > target_version {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: target_version,
        });
    }

    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > from_version)
        .collect();
    if pending.is_empty() {
        return Ok(MigrationReport {
            from_version,
            to_version: from_version,
            applied: Vec::new(),
        });
    }

    let as_migration_error = |source: rusqlite::Error| DbError::Migration {
        from_version,
        target_version,
        source,
    };
    let tx = conn.transaction().map_err(as_migration_error)?;
    for migration in &pending {
        tx.execute_batch(migration.sql)
            .and_then(|()| tx.pragma_update(None, "user_version", migration.version))
            .map_err(as_migration_error)?;
    }
    tx.commit().map_err(as_migration_error)?;

    let applied: Vec<u32> = pending.iter().map(|migration| migration.version).collect();
    info!(
        "event=db_migrate module=db status=ok from_version={from_version} to_version={target_version} applied={applied:?}"
    );
    Ok(MigrationReport {
        from_version,
        to_version: target_version,
        applied,
    })
}
