//! Schema objects installed by the upgrade and removed by the downgrade.

use serde::Serialize;

use crate::Dialect;

/// Named unique constraint over a column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UniqueConstraint {
    pub name: &'static str,
    pub table: &'static str,
    pub columns: [&'static str; 2],
}

impl UniqueConstraint {
    #[must_use]
    pub const fn new(name: &'static str, table: &'static str, columns: [&'static str; 2]) -> Self {
        Self { name, table, columns }
    }

    /// SQLite has no `ADD CONSTRAINT`, so the constraint becomes a named unique
    /// index there. Both forms reject the same inserts.
    #[must_use]
    pub fn create_sql(&self, dialect: Dialect) -> String {
        let [first, second] = self.columns;
        match dialect {
            Dialect::Postgres => format!(
                "ALTER TABLE {} ADD CONSTRAINT {} UNIQUE ({}, {})",
                self.table, self.name, first, second
            ),
            Dialect::Sqlite => format!(
                "CREATE UNIQUE INDEX {} ON {} ({}, {})",
                self.name, self.table, first, second
            ),
        }
    }

    #[must_use]
    pub fn drop_sql(&self, dialect: Dialect) -> String {
        match dialect {
            Dialect::Postgres => {
                format!("ALTER TABLE {} DROP CONSTRAINT {}", self.table, self.name)
            },
            Dialect::Sqlite => format!("DROP INDEX {}", self.name),
        }
    }
}

/// Single-column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexSpec {
    pub name: &'static str,
    pub table: &'static str,
    pub column: &'static str,
    pub unique: bool,
}

impl IndexSpec {
    #[must_use]
    pub const fn new(name: &'static str, table: &'static str, column: &'static str) -> Self {
        Self { name, table, column, unique: false }
    }

    #[must_use]
    pub fn create_sql(&self) -> String {
        let kind = if self.unique { "UNIQUE INDEX" } else { "INDEX" };
        format!("CREATE {} {} ON {} ({})", kind, self.name, self.table, self.column)
    }

    #[must_use]
    pub fn drop_sql(&self) -> String {
        format!("DROP INDEX {}", self.name)
    }
}
