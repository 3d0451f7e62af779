use clientdb_core::db::migrations::{apply_migrations, latest_version};
use clientdb_core::db::{close_db, open_db, open_db_in_memory, DbError};
use std::error::Error;
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "clients");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clients.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    close_db(conn_first).unwrap();

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "clients");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn opening_preexisting_store_keeps_its_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE clients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            fio TEXT,
            login TEXT,
            birthday TEXT,
            email TEXT
        );
        INSERT INTO clients (fio, login, birthday, email)
        VALUES ('Ivanov Ivan', 'ivan', '19900215', 'ivan@mail.com');",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM clients;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opened_connections_have_foreign_keys_enabled() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn opening_store_in_missing_directory_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("clients.db");

    let err = open_db(&path).unwrap_err();
    assert!(matches!(&err, DbError::Open { path: failed, .. } if failed == &path));
    assert_eq!(err.path(), Some(path.as_path()));
    assert!(err.to_string().contains("clients.db"));
    assert!(err.source().is_some());
}

#[test]
fn apply_migrations_reports_applied_versions_once() {
    let mut conn = Connection::open_in_memory().unwrap();

    let first = apply_migrations(&mut conn).unwrap();
    assert_eq!(first.from_version, 0);
    assert_eq!(first.to_version, latest_version());
    assert_eq!(first.applied, (1..=latest_version()).collect::<Vec<_>>());

    let second = apply_migrations(&mut conn).unwrap();
    assert!(second.is_noop());
    assert_eq!(second.from_version, latest_version());
    assert_eq!(second.to_version, latest_version());
}

#[test]
fn failed_migration_leaves_store_at_starting_version() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE contacts (email TEXT);
         CREATE INDEX clients ON contacts (email);",
    )
    .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    match err {
        DbError::Migration {
            from_version,
            target_version,
            ..
        } => {
            assert_eq!(from_version, 0);
            assert_eq!(target_version, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(schema_version(&conn), 0);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
