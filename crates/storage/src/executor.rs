//! Seam between the revision plan and a live database.

use async_trait::async_trait;
use dedup_migrate_core::Dialect;

use crate::error::StorageError;

/// Runs SQL against one database in the dialect it was configured for.
#[async_trait]
pub trait StepExecutor: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Executes `statements` in order inside a single transaction and commits.
    ///
    /// Returns the affected-row count of each statement. On error the
    /// transaction is rolled back and nothing from the batch is kept.
    async fn run_batch(&self, statements: &[String]) -> Result<Vec<u64>, StorageError>;
}
