//! Units of work and their SQL.

use std::fmt;
use std::str::FromStr;

use crate::error::MigrationError;
use crate::revision::{DOWN_REVISION, REVISION, downgrade_plan, upgrade_plan};
use crate::schema::{IndexSpec, UniqueConstraint};
use crate::table_meta::TableMeta;
use crate::Dialect;

/// Which way the revision is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    #[must_use]
    pub fn plan(self) -> Vec<Batch> {
        match self {
            Self::Up => upgrade_plan(),
            Self::Down => downgrade_plan(),
        }
    }
}

impl FromStr for Direction {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "upgrade" => Ok(Self::Up),
            "down" | "downgrade" => Ok(Self::Down),
            _ => Err(MigrationError::InvalidDirection(s.to_owned())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "upgrade",
            Self::Down => "downgrade",
        })
    }
}

/// One DDL or DML operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Deduplicate(TableMeta),
    AddUnique(UniqueConstraint),
    CreateIndex(IndexSpec),
    DropUnique(UniqueConstraint),
    DropIndex(IndexSpec),
}

impl Step {
    #[must_use]
    pub fn sql(&self, dialect: Dialect) -> String {
        match self {
            Self::Deduplicate(meta) => dedup_sql(meta, dialect),
            Self::AddUnique(constraint) => constraint.create_sql(dialect),
            Self::CreateIndex(index) => index.create_sql(),
            Self::DropUnique(constraint) => constraint.drop_sql(dialect),
            Self::DropIndex(index) => index.drop_sql(),
        }
    }

    /// Name of the constraint or index the step creates or drops.
    #[must_use]
    pub const fn object_name(&self) -> Option<&'static str> {
        match self {
            Self::Deduplicate(_) => None,
            Self::AddUnique(c) | Self::DropUnique(c) => Some(c.name),
            Self::CreateIndex(i) | Self::DropIndex(i) => Some(i.name),
        }
    }

    #[must_use]
    pub const fn table(&self) -> &'static str {
        match self {
            Self::Deduplicate(meta) => meta.tablename,
            Self::AddUnique(c) | Self::DropUnique(c) => c.table,
            Self::CreateIndex(i) | Self::DropIndex(i) => i.table,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deduplicate(m) => {
                write!(f, "remove duplicate ({}, {}) rows from {}", m.pk_1, m.pk_2, m.tablename)
            },
            Self::AddUnique(c) => write!(f, "add unique constraint {} on {}", c.name, c.table),
            Self::CreateIndex(i) => write!(f, "create index {} on {}", i.name, i.table),
            Self::DropUnique(c) => write!(f, "drop unique constraint {} on {}", c.name, c.table),
            Self::DropIndex(i) => write!(f, "drop index {} on {}", i.name, i.table),
        }
    }
}

/// Steps that commit together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub name: String,
    pub steps: Vec<Step>,
}

impl Batch {
    #[must_use]
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self { name: name.into(), steps }
    }

    #[must_use]
    pub fn statements(&self, dialect: Dialect) -> Vec<String> {
        self.steps.iter().map(|s| s.sql(dialect)).collect()
    }
}

/// Deletes every row that has a twin with the same key pair and a smaller row
/// identifier, so the oldest physical row of each group survives.
///
/// Rows with a NULL in either key column never compare equal and are kept.
#[must_use]
pub fn dedup_sql(meta: &TableMeta, dialect: Dialect) -> String {
    let t = meta.tablename;
    let rowid = dialect.row_id_column();
    format!(
        "DELETE FROM {t}
WHERE EXISTS (
    SELECT 1 FROM {t} t2
    WHERE {t}.{pk_1} = t2.{pk_1}
    AND {t}.{pk_2} = t2.{pk_2}
    AND {t}.{rowid} > t2.{rowid}
)",
        pk_1 = meta.pk_1,
        pk_2 = meta.pk_2,
    )
}

/// Full script for one direction, with a `BEGIN`/`COMMIT` pair per batch.
#[must_use]
pub fn render_sql(dialect: Dialect, direction: Direction) -> String {
    let (from, to) = match direction {
        Direction::Up => (DOWN_REVISION, REVISION),
        Direction::Down => (REVISION, DOWN_REVISION),
    };
    let mut out = format!("-- {direction} {from} -> {to} ({dialect})\n");
    for batch in direction.plan() {
        out.push_str(&format!("\n-- {}\nBEGIN;\n", batch.name));
        for step in &batch.steps {
            out.push_str(&format!("-- {step}\n{};\n", step.sql(dialect)));
        }
        out.push_str("COMMIT;\n");
    }
    out
}
