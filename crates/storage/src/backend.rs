//! Executor chosen from configuration, with enum dispatch.

#[cfg(feature = "sqlite")]
use std::path::Path;

use async_trait::async_trait;
use dedup_migrate_core::{Dialect, MigrationConfig};

use crate::error::StorageError;
use crate::executor::StepExecutor;

macro_rules! dispatch {
    ($self:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            MigrationBackend::Sqlite(s) => s.$method($($arg),*).await,
            #[cfg(feature = "postgres")]
            MigrationBackend::Postgres(s) => s.$method($($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum MigrationBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::SqliteExecutor),
    #[cfg(feature = "postgres")]
    Postgres(crate::PgExecutor),
}

impl MigrationBackend {
    /// Opens the executor matching `config.dialect`.
    pub async fn connect(config: &MigrationConfig) -> Result<Self, StorageError> {
        match config.dialect {
            #[cfg(feature = "sqlite")]
            Dialect::Sqlite => Ok(Self::Sqlite(crate::SqliteExecutor::open(
                Path::new(config.sqlite_path()),
                config.sqlite_busy_timeout_ms,
            )?)),
            #[cfg(feature = "postgres")]
            Dialect::Postgres => Ok(Self::Postgres(
                crate::PgExecutor::connect(&config.database_url, config.pg_connect_timeout_secs)
                    .await?,
            )),
            #[allow(unreachable_patterns, reason = "reachable when a backend feature is off")]
            other => Err(StorageError::Unsupported(other)),
        }
    }
}

#[async_trait]
impl StepExecutor for MigrationBackend {
    fn dialect(&self) -> Dialect {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(s) => s.dialect(),
            #[cfg(feature = "postgres")]
            Self::Postgres(s) => s.dialect(),
        }
    }

    async fn run_batch(&self, statements: &[String]) -> Result<Vec<u64>, StorageError> {
        dispatch!(self, run_batch(statements))
    }
}
