//! Environment variable parsing with warn-level logging for invalid values.

/// Busy timeout applied to SQLite connections, in milliseconds.
pub const SQLITE_BUSY_TIMEOUT_ENV: &str = "DEDUP_MIGRATE_SQLITE_BUSY_TIMEOUT_MS";
pub const DEFAULT_SQLITE_BUSY_TIMEOUT_MS: u64 = 5000;

/// Time allowed to acquire a PostgreSQL connection, in seconds.
pub const PG_CONNECT_TIMEOUT_ENV: &str = "DEDUP_MIGRATE_PG_CONNECT_TIMEOUT_SECS";
pub const DEFAULT_PG_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently.
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

#[must_use]
pub fn sqlite_busy_timeout_ms() -> u64 {
    env_parse_with_default(SQLITE_BUSY_TIMEOUT_ENV, DEFAULT_SQLITE_BUSY_TIMEOUT_MS)
}

#[must_use]
pub fn pg_connect_timeout_secs() -> u64 {
    env_parse_with_default(PG_CONNECT_TIMEOUT_ENV, DEFAULT_PG_CONNECT_TIMEOUT_SECS)
}
