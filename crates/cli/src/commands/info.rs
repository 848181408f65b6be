use dedup_migrate_core::RevisionInfo;

pub(crate) fn run() -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&RevisionInfo::current())?);
    Ok(())
}
