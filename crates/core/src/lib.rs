//! Core types for the `dded3119c1fe` unique-constraint migration.
//!
//! Everything here is pure: table metadata, the fixed revision plan and the
//! SQL it renders for each dialect. Executing the plan lives in
//! `dedup-migrate-storage`.

mod config;
mod dialect;
pub mod env_config;
mod error;
pub mod revision;
mod schema;
mod step;
mod table_meta;

pub use config::MigrationConfig;
pub use dialect::Dialect;
pub use error::{MigrationError, Result};
pub use revision::{RevisionInfo, downgrade_plan, upgrade_plan};
pub use schema::{IndexSpec, UniqueConstraint};
pub use step::{Batch, Direction, Step, dedup_sql, render_sql};
pub use table_meta::{COMPOSITE_PK_SEPARATOR, TableMeta};
