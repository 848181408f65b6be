//! Target database engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MigrationError;

/// Database engine a migration runs against.
///
/// Chosen once at configuration time and carried by the executor; SQL
/// rendering never inspects the live connection to decide.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Dialect {
    /// Engine-native implicit row address used as the dedup tiebreaker.
    #[must_use]
    pub const fn row_id_column(&self) -> &'static str {
        match *self {
            Self::Postgres => "CTID",
            Self::Sqlite => "ROWID",
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Postgres => "postgresql",
            Self::Sqlite => "sqlite",
        }
    }

    /// Infers the dialect from a connection URL scheme.
    ///
    /// `postgres://` and `postgresql://` select PostgreSQL; everything else is
    /// treated as a SQLite path or `sqlite:` URL.
    #[must_use]
    pub fn from_database_url(url: &str) -> Self {
        let lower = url.trim().to_lowercase();
        if lower.starts_with("postgres://") || lower.starts_with("postgresql://") {
            Self::Postgres
        } else {
            Self::Sqlite
        }
    }
}

impl FromStr for Dialect {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" => Ok(Self::Postgres),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            _ => Err(MigrationError::InvalidDialect(s.to_owned())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
