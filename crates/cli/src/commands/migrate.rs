//! Online upgrade / downgrade against the configured database.

use dedup_migrate_core::MigrationConfig;
use dedup_migrate_storage::MigrationBackend;

pub(crate) async fn upgrade(config: &MigrationConfig) -> anyhow::Result<()> {
    let backend = MigrationBackend::connect(config).await?;
    let report = dedup_migrate_storage::upgrade(&backend).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) async fn downgrade(config: &MigrationConfig) -> anyhow::Result<()> {
    let backend = MigrationBackend::connect(config).await?;
    let report = dedup_migrate_storage::downgrade(&backend).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
