//! Client repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Point lookup, insertion and deletion over the `clients` table.
//! - Map rows into `Client` values.
//!
//! # Invariants
//! - `NotFound` is only produced when zero rows matched; every other store
//!   failure is surfaced as `Db`.
//! - Inserts ignore the caller-provided `Client::id`.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::client::{Client, ClientId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CLIENTS_TABLE: &str = "clients";
const CLIENT_COLUMNS: [&str; 5] = ["id", "fio", "login", "birthday", "email"];

const CLIENT_SELECT_SQL: &str = "SELECT
    id,
    fio,
    login,
    birthday,
    email
FROM clients";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for client persistence and lookup.
#[derive(Debug)]
pub enum RepoError {
    /// Generic store failure (I/O, constraint violation, malformed row).
    Db(DbError),
    /// No row matched the identifier.
    NotFound(ClientId),
    /// Connection schema version does not match the binary.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Returns whether this is the not-found signal rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "client not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "client repository requires schema version {expected_version}, found {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "client repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "client repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for client operations.
pub trait ClientRepository {
    /// Looks up one client, returning `Ok(None)` when no row matches.
    fn find_client(&self, id: ClientId) -> RepoResult<Option<Client>>;

    /// Looks up one client, returning `RepoError::NotFound` when no row matches.
    fn get_client(&self, id: ClientId) -> RepoResult<Client> {
        self.find_client(id)?.ok_or(RepoError::NotFound(id))
    }

    /// Persists a new row and returns the store-assigned identifier.
    fn insert_client(&self, client: &Client) -> RepoResult<ClientId>;

    /// Removes one row; a missing identifier yields `RepoError::NotFound`.
    fn delete_client(&self, id: ClientId) -> RepoResult<()>;
}

/// SQLite-backed client repository borrowing a long-lived store handle.
pub struct SqliteClientRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClientRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the `clients`
    ///   table does not have the expected shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_client_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ClientRepository for SqliteClientRepository<'_> {
    fn find_client(&self, id: ClientId) -> RepoResult<Option<Client>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{CLIENT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_client_row(row)?));
        }

        Ok(None)
    }

    fn insert_client(&self, client: &Client) -> RepoResult<ClientId> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO clients (fio, login, birthday, email)
             VALUES (?1, ?2, ?3, ?4);",
        )?;
        let id = stmt.insert(params![
            client.fio.as_str(),
            client.login.as_str(),
            client.birthday.as_str(),
            client.email.as_str(),
        ])?;

        Ok(id)
    }

    fn delete_client(&self, id: ClientId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM clients WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_client_row(row: &Row<'_>) -> RepoResult<Client> {
    Ok(Client {
        id: row.get("id")?,
        fio: row.get("fio")?,
        login: row.get("login")?,
        birthday: row.get("birthday")?,
        email: row.get("email")?,
    })
}

fn ensure_client_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, CLIENTS_TABLE)? {
        return Err(RepoError::MissingRequiredTable(CLIENTS_TABLE));
    }

    for column in CLIENT_COLUMNS {
        if !table_has_column(conn, CLIENTS_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: CLIENTS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
