//! Create the catalog tables. Idempotent; run once at startup before serving.

use crate::error::StoreError;
use sqlx::SqlitePool;

/// Tables in dependency order: `movie` references the other two.
/// `AUTOINCREMENT` keeps ids from being reused after a delete.
const SCHEMA: &[(&str, &str)] = &[
    (
        "genre",
        r#"
        CREATE TABLE IF NOT EXISTS genre (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(255)
        )
        "#,
    ),
    (
        "director",
        r#"
        CREATE TABLE IF NOT EXISTS director (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(255)
        )
        "#,
    ),
    (
        "movie",
        r#"
        CREATE TABLE IF NOT EXISTS movie (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title VARCHAR(255),
            description VARCHAR(255),
            trailer VARCHAR(255),
            year INTEGER,
            rating FLOAT,
            genre_id INTEGER REFERENCES genre (id),
            director_id INTEGER REFERENCES director (id)
        )
        "#,
    ),
];

pub async fn apply_migrations(pool: &SqlitePool) -> Result<(), StoreError> {
    for &(table, ddl) in SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
        tracing::debug!(table, "table ensured");
    }
    tracing::info!("catalog schema ready");
    Ok(())
}
