//! Test utilities and module declarations for storage tests.

#![allow(clippy::unwrap_used, reason = "test code")]

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use dedup_migrate_core::TableMeta;
use dedup_migrate_core::revision::DEDUP_TABLES;
use rusqlite::{Connection, OptionalExtension, params};
use tempfile::TempDir;

use crate::SqliteExecutor;

/// Creates every table the revision touches, with no keys or indexes, the way
/// the schema looked before the unique constraints existed.
pub fn create_fixture_db() -> (SqliteExecutor, TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("fixture.db");
    let conn = Connection::open(&db_path).unwrap();
    for meta in &DEDUP_TABLES {
        conn.execute_batch(&format!(
            "CREATE TABLE {} ({} TEXT, {} TEXT, note TEXT, created_at TEXT);",
            meta.tablename, meta.pk_1, meta.pk_2
        ))
        .unwrap();
    }
    drop(conn);
    let executor = SqliteExecutor::open(&db_path, 1000).unwrap();
    (executor, temp_dir, db_path)
}

pub fn open_raw(db_path: &Path) -> Connection {
    Connection::open(db_path).unwrap()
}

pub fn insert_row(
    conn: &Connection,
    meta: &TableMeta,
    pk_1: Option<&str>,
    pk_2: Option<&str>,
    note: &str,
) -> rusqlite::Result<usize> {
    conn.execute(
        &format!(
            "INSERT INTO {} ({}, {}, note, created_at) VALUES (?1, ?2, ?3, datetime('now'))",
            meta.tablename, meta.pk_1, meta.pk_2
        ),
        params![pk_1, pk_2, note],
    )
}

/// Five rows per table: `(a, x)` three times, plus `(a, y)` and `(b, x)`.
pub fn seed_duplicates(conn: &Connection) {
    for meta in &DEDUP_TABLES {
        insert_row(conn, meta, Some("a"), Some("x"), "first").unwrap();
        insert_row(conn, meta, Some("a"), Some("x"), "second").unwrap();
        insert_row(conn, meta, Some("a"), Some("y"), "third").unwrap();
        insert_row(conn, meta, Some("b"), Some("x"), "fourth").unwrap();
        insert_row(conn, meta, Some("a"), Some("x"), "fifth").unwrap();
    }
}

pub fn row_count(conn: &Connection, meta: &TableMeta) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", meta.tablename), [], |row| row.get(0))
        .unwrap()
}

pub fn notes_for(conn: &Connection, meta: &TableMeta, pk_1: &str, pk_2: &str) -> Vec<String> {
    let sql = format!(
        "SELECT note FROM {} WHERE {} = ?1 AND {} = ?2 ORDER BY ROWID",
        meta.tablename, meta.pk_1, meta.pk_2
    );
    let mut stmt = conn.prepare(&sql).unwrap();
    stmt.query_map(params![pk_1, pk_2], |row| row.get(0))
        .unwrap()
        .collect::<rusqlite::Result<Vec<String>>>()
        .unwrap()
}

/// Named indexes, excluding the ones SQLite creates implicitly.
pub fn index_names(conn: &Connection) -> HashSet<String> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND name NOT LIKE 'sqlite_autoindex%'",
        )
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<rusqlite::Result<HashSet<String>>>()
        .unwrap()
}

pub fn index_table(conn: &Connection, index: &str) -> Option<String> {
    conn.query_row(
        "SELECT tbl_name FROM sqlite_master WHERE type = 'index' AND name = ?1",
        params![index],
        |row| row.get(0),
    )
    .optional()
    .unwrap()
}
