//! Executes the unique-constraint revision against SQLite or PostgreSQL.
//!
//! The plan itself comes from `dedup-migrate-core`; this crate owns
//! connections, transactions and error classification.

#[cfg(not(any(feature = "sqlite", feature = "postgres")))]
compile_error!("enable at least one backend feature: `sqlite` or `postgres`");

mod backend;
mod error;
mod executor;
#[cfg(feature = "postgres")]
mod pg;
mod runner;
#[cfg(feature = "sqlite")]
mod sqlite;
#[cfg(all(test, feature = "sqlite"))]
mod tests;

pub use backend::MigrationBackend;
pub use error::StorageError;
pub use executor::StepExecutor;
#[cfg(feature = "postgres")]
pub use pg::PgExecutor;
pub use runner::{DedupOutcome, DowngradeReport, UpgradeReport, downgrade, upgrade};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteExecutor;
