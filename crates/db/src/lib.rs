//! SQLite-backed entity store for chapters, characters and cards.

use std::str::FromStr;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod error;
pub mod repositories;

pub use error::StoreError;
pub use storygrid_core::models;

pub type DbPool = sqlx::SqlitePool;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a connection pool from a database URL.
///
/// The database file is created if missing. Foreign keys are enforced on
/// every connection. An in-memory URL gets a single shared connection,
/// since each SQLite connection would otherwise see its own database.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    if database_url.contains(":memory:") {
        return create_in_memory_pool().await;
    }
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Create a pool over a private in-memory database. Used by tests.
pub async fn create_in_memory_pool() -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
