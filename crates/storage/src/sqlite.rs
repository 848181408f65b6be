//! SQLite executor: rusqlite behind an r2d2 pool, driven through `spawn_blocking`.

#![allow(
    clippy::as_conversions,
    reason = "SQLite affected-row counts always fit in u64"
)]

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use dedup_migrate_core::Dialect;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::error::StorageError;
use crate::executor::StepExecutor;

/// Run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

#[derive(Clone, Debug)]
pub struct SqliteExecutor {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteExecutor {
    /// Opens an existing database file. A missing file is an error rather than
    /// a fresh empty database, since there would be nothing to migrate.
    pub fn open(db_path: &Path, busy_timeout_ms: u64) -> Result<Self, StorageError> {
        if !db_path.is_file() {
            return Err(StorageError::Config(format!(
                "sqlite database not found: {}",
                db_path.display()
            )));
        }

        let timeout = Duration::from_millis(busy_timeout_ms);
        let manager = SqliteConnectionManager::file(db_path)
            .with_init(move |conn| conn.busy_timeout(timeout));
        // One connection: migrations are strictly sequential.
        let pool = Pool::builder().max_size(1).build(manager)?;

        tracing::info!(path = %db_path.display(), "SQLite executor opened");
        Ok(Self { pool })
    }
}

#[async_trait]
impl StepExecutor for SqliteExecutor {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn run_batch(&self, statements: &[String]) -> Result<Vec<u64>, StorageError> {
        let pool = self.pool.clone();
        let statements = statements.to_vec();
        blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            let mut affected = Vec::with_capacity(statements.len());
            for sql in &statements {
                affected.push(tx.execute(sql, [])? as u64);
            }
            tx.commit()?;
            Ok(affected)
        })
        .await
    }
}
