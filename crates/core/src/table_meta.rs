//! Logical composite key of a table that gets deduplicated.

use serde::Serialize;

/// Separator used when flattening a composite key into one string.
pub const COMPOSITE_PK_SEPARATOR: &str = "$$";

/// One table and the column pair that should identify its rows.
///
/// Several of the affected tables have no declared primary key, so the pair is
/// only a logical key until the upgrade installs a unique constraint over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableMeta {
    pub tablename: &'static str,
    pub pk_1: &'static str,
    pub pk_2: &'static str,
}

impl TableMeta {
    #[must_use]
    pub const fn new(tablename: &'static str, pk_1: &'static str, pk_2: &'static str) -> Self {
        Self { tablename, pk_1, pk_2 }
    }

    /// Flattens a `(pk_1, pk_2)` value pair into a single comparable string.
    #[must_use]
    pub fn composite_pk(pk_1_val: &str, pk_2_val: &str) -> String {
        [pk_1_val, pk_2_val].join(COMPOSITE_PK_SEPARATOR)
    }

    #[must_use]
    pub const fn columns(&self) -> [&'static str; 2] {
        [self.pk_1, self.pk_2]
    }
}
