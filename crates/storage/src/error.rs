//! Typed error enum for executing migration batches.
//!
//! Callers match on `Duplicate` to tell a uniqueness violation apart from any
//! other database failure.

use dedup_migrate_core::Dialect;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Unique constraint violation.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// PostgreSQL SQL / connection / timeout failure.
    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// SQLite statement failure.
    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[source] rusqlite::Error),

    #[cfg(feature = "sqlite")]
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0} support is not compiled in")]
    Unsupported(Dialect),
}

impl StorageError {
    /// Whether this error is a unique-constraint violation.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// SQLSTATE 23505 → `Duplicate`, everything else → `Database`.
#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c == "23505") => {
                Self::Duplicate(db_err.message().to_owned())
            },
            _ => Self::Database(err),
        }
    }
}

/// `SQLITE_CONSTRAINT_UNIQUE` / `SQLITE_CONSTRAINT_PRIMARYKEY` → `Duplicate`.
#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, msg)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                Self::Duplicate(msg.clone().unwrap_or_else(|| e.to_string()))
            },
            _ => Self::Sqlite(err),
        }
    }
}
