//! Persistence layer: PostgreSQL models, repositories, lifecycle services,
//! embedded migrations, schema-version introspection, and the demo seeder.

pub mod error;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod seed;
pub mod services;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub type DbPool = sqlx::PgPool;

/// Embedded migrations. Applied by the CLI and by `#[sqlx::test]`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database connection is usable.
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
