//! PostgreSQL executor using sqlx.

use std::time::Duration;

use async_trait::async_trait;
use dedup_migrate_core::Dialect;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::StorageError;
use crate::executor::StepExecutor;

#[derive(Clone, Debug)]
pub struct PgExecutor {
    pool: PgPool,
}

impl PgExecutor {
    pub async fn connect(database_url: &str, connect_timeout_secs: u64) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(connect_timeout_secs))
            .connect(database_url)
            .await?;
        tracing::info!("PostgreSQL executor connected");
        Ok(Self { pool })
    }

    /// Wraps an existing pool, e.g. one whose connections pin a `search_path`.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl StepExecutor for PgExecutor {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    async fn run_batch(&self, statements: &[String]) -> Result<Vec<u64>, StorageError> {
        // Dropped without commit on `?`, which rolls back.
        let mut tx = self.pool.begin().await?;
        let mut affected = Vec::with_capacity(statements.len());
        for sql in statements {
            let result = sqlx::query(sql).execute(&mut *tx).await?;
            affected.push(result.rows_affected());
        }
        tx.commit().await?;
        Ok(affected)
    }
}
