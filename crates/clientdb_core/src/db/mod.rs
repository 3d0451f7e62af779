//! SQLite store bootstrap and schema migration entry points.
//!
//! The store file is supplied by the caller; this module opens it, brings its
//! schema up to date and hands back the long-lived handle.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub mod migrations;
mod open;

pub use migrations::MigrationReport;
pub use open::{close_db, open_db, open_db_in_memory, BUSY_TIMEOUT};

pub type DbResult<T> = Result<T, DbError>;

/// Store-level failure. Every variant is a generic failure for callers;
/// the not-found signal lives in the repository layer.
#[derive(Debug)]
pub enum DbError {
    /// The supplied store file could not be opened.
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    /// A migration step failed; the store stays at `from_version`.
    Migration {
        from_version: u32,
        target_version: u32,
        source: rusqlite::Error,
    },
    /// The store was written by a newer binary.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// SQLite refused to release the handle.
    Close(rusqlite::Error),
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Store file involved in the failure, when one is known.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Open { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open client store `{}`: {source}", path.display())
            }
            Self::Migration {
                from_version,
                target_version,
                source,
            } => write!(
                f,
                "client store migration {from_version} -> {target_version} failed: {source}"
            ),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "client store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Close(source) => write!(f, "cannot close client store: {source}"),
            Self::Sqlite(source) => write!(f, "{source}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Migration { source, .. } => Some(source),
            Self::Close(source) | Self::Sqlite(source) => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
