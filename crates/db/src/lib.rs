//! Sharepad persistence layer.
//!
//! The store boundary is a single-document contract: `get`/`put`/`delete`
//! one room row by id, no multi-document transactions. [`store::RoomStore`]
//! is the trait, with a PostgreSQL implementation for deployment and an
//! in-memory one for tests and local development. [`repositories::RoomRepo`]
//! implements the read-modify-write reconciliation protocol on top.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod store;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
