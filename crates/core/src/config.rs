//! Connection target resolved once at startup.

use crate::env_config::{pg_connect_timeout_secs, sqlite_busy_timeout_ms};
use crate::error::{MigrationError, Result};
use crate::Dialect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    pub database_url: String,
    pub dialect: Dialect,
    pub sqlite_busy_timeout_ms: u64,
    pub pg_connect_timeout_secs: u64,
}

impl MigrationConfig {
    /// An explicit dialect wins; otherwise it is inferred from the URL scheme.
    pub fn resolve(database_url: Option<String>, dialect: Option<Dialect>) -> Result<Self> {
        let database_url = database_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(MigrationError::MissingDatabaseUrl)?;
        let dialect = dialect.unwrap_or_else(|| Dialect::from_database_url(&database_url));
        Ok(Self {
            database_url,
            dialect,
            sqlite_busy_timeout_ms: sqlite_busy_timeout_ms(),
            pg_connect_timeout_secs: pg_connect_timeout_secs(),
        })
    }

    /// Filesystem path for SQLite targets, with any `sqlite:` prefix removed.
    #[must_use]
    pub fn sqlite_path(&self) -> &str {
        let url = self.database_url.as_str();
        url.strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url)
    }
}
