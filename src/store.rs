//! Database connection. The SQLite file is created on first connect.

use crate::error::StoreError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Open a pool on `database_url` (e.g. `sqlite://movies.db`), creating the file if missing.
///
/// Foreign keys are declared in the schema but not enforced, so movies may
/// reference ids that do not exist (or no longer exist).
pub async fn connect(database_url: &str) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(false);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    tracing::info!(database_url, "database connected");
    Ok(pool)
}

/// Single-connection pool on a private in-memory database. The connection is
/// never recycled, so the data lives as long as the pool.
pub async fn connect_in_memory() -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(false);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    Ok(pool)
}
