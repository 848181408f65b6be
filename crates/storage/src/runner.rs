//! Upgrade and downgrade entry points.

use dedup_migrate_core::revision::{DOWN_REVISION, REVISION};
use dedup_migrate_core::{Batch, Step, downgrade_plan, upgrade_plan};
use serde::Serialize;

use crate::error::StorageError;
use crate::executor::StepExecutor;

/// Rows removed from one table by deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DedupOutcome {
    pub table: &'static str,
    pub rows_removed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpgradeReport {
    pub duplicates_removed: Vec<DedupOutcome>,
    pub constraints_added: usize,
    pub indexes_created: usize,
}

impl UpgradeReport {
    #[must_use]
    pub fn total_rows_removed(&self) -> u64 {
        self.duplicates_removed.iter().map(|o| o.rows_removed).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DowngradeReport {
    pub constraints_dropped: usize,
    pub indexes_dropped: usize,
}

async fn run_batch<E: StepExecutor + ?Sized>(
    executor: &E,
    batch: &Batch,
) -> Result<Vec<u64>, StorageError> {
    let dialect = executor.dialect();
    for step in &batch.steps {
        tracing::info!(table = step.table(), "{step}");
        tracing::debug!(sql = %step.sql(dialect), "queued statement");
    }
    let affected = executor.run_batch(&batch.statements(dialect)).await.inspect_err(|e| {
        tracing::error!(batch = %batch.name, "batch failed, rolled back: {e}");
    })?;
    tracing::debug!(batch = %batch.name, "batch committed");
    Ok(affected)
}

/// Removes duplicate key pairs, then installs the unique constraints and the
/// `created_at` index. Not idempotent: a second run fails on existing objects.
pub async fn upgrade<E: StepExecutor + ?Sized>(executor: &E) -> Result<UpgradeReport, StorageError> {
    tracing::info!(
        from = DOWN_REVISION,
        to = REVISION,
        dialect = %executor.dialect(),
        "Running upgrade"
    );

    let mut report = UpgradeReport::default();
    for batch in upgrade_plan() {
        let affected = run_batch(executor, &batch).await?;
        for (step, rows) in batch.steps.iter().zip(affected) {
            match step {
                Step::Deduplicate(meta) => {
                    if rows > 0 {
                        tracing::info!(table = meta.tablename, rows, "removed duplicate rows");
                    }
                    report
                        .duplicates_removed
                        .push(DedupOutcome { table: meta.tablename, rows_removed: rows });
                },
                Step::AddUnique(_) => report.constraints_added += 1,
                Step::CreateIndex(_) => report.indexes_created += 1,
                Step::DropUnique(_) | Step::DropIndex(_) => {},
            }
        }
    }

    tracing::info!(
        rows_removed = report.total_rows_removed(),
        constraints = report.constraints_added,
        "Upgrade to {REVISION} complete"
    );
    Ok(report)
}

/// Drops the constraints and index added by [`upgrade`]. Deleted duplicates
/// are not restored.
pub async fn downgrade<E: StepExecutor + ?Sized>(
    executor: &E,
) -> Result<DowngradeReport, StorageError> {
    tracing::info!(
        from = REVISION,
        to = DOWN_REVISION,
        dialect = %executor.dialect(),
        "Running downgrade"
    );

    let mut report = DowngradeReport::default();
    for batch in downgrade_plan() {
        run_batch(executor, &batch).await?;
        for step in &batch.steps {
            match step {
                Step::DropUnique(_) => report.constraints_dropped += 1,
                Step::DropIndex(_) => report.indexes_dropped += 1,
                Step::Deduplicate(_) | Step::AddUnique(_) | Step::CreateIndex(_) => {},
            }
        }
    }

    tracing::info!("Downgrade to {DOWN_REVISION} complete");
    Ok(report)
}
