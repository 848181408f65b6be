use thiserror::Error;

/// Errors raised before any SQL reaches the database.
#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("invalid dialect: {0} (expected postgresql or sqlite)")]
    InvalidDialect(String),

    #[error("database URL not configured (set DATABASE_URL or pass --database-url)")]
    MissingDatabaseUrl,

    #[error("invalid direction: {0} (expected up|down)")]
    InvalidDirection(String),
}

pub type Result<T> = std::result::Result<T, MigrationError>;
