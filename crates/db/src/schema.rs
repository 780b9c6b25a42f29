//! Schema-version introspection.
//!
//! The current migration version is an explicit persisted record: the
//! `_sqlx_migrations` table maintained by the embedded migrator. Reading it
//! here, rather than caching anything in memory, keeps concurrent and
//! restarted processes in agreement about the schema they are running on.

use medtrack_core::types::Timestamp;
use sqlx::migrate::MigrationType;
use sqlx::{FromRow, PgPool};

/// One applied migration, as recorded in `_sqlx_migrations`.
#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct AppliedMigration {
    pub version: i64,
    pub description: String,
    pub installed_on: Timestamp,
    pub success: bool,
}

/// The highest successfully applied migration version, or `None` on a fresh
/// database (including one where the migrations table does not exist yet).
pub async fn current_version(pool: &PgPool) -> Result<Option<i64>, sqlx::Error> {
    if !migrations_table_exists(pool).await? {
        return Ok(None);
    }
    sqlx::query_scalar("SELECT MAX(version) FROM _sqlx_migrations WHERE success")
        .fetch_one(pool)
        .await
}

/// Applied migrations in version order. Empty on a fresh database.
pub async fn history(pool: &PgPool) -> Result<Vec<AppliedMigration>, sqlx::Error> {
    if !migrations_table_exists(pool).await? {
        return Ok(Vec::new());
    }
    sqlx::query_as::<_, AppliedMigration>(
        "SELECT version, description, installed_on, success
         FROM _sqlx_migrations
         ORDER BY version",
    )
    .fetch_all(pool)
    .await
}

/// The highest migration version embedded in this binary.
pub fn latest_embedded_version() -> Option<i64> {
    crate::MIGRATOR
        .iter()
        .filter(|m| !matches!(m.migration_type, MigrationType::ReversibleDown))
        .map(|m| m.version)
        .max()
}

/// Embedded migration versions not yet applied to the database.
pub async fn pending_versions(pool: &PgPool) -> Result<Vec<i64>, sqlx::Error> {
    let applied: Vec<i64> = history(pool).await?.into_iter().map(|m| m.version).collect();
    Ok(crate::MIGRATOR
        .iter()
        .filter(|m| !matches!(m.migration_type, MigrationType::ReversibleDown))
        .map(|m| m.version)
        .filter(|v| !applied.contains(v))
        .collect())
}

/// Whether the database is at the latest embedded migration version.
pub async fn is_up_to_date(pool: &PgPool) -> Result<bool, sqlx::Error> {
    Ok(current_version(pool).await? == latest_embedded_version()
        && latest_embedded_version().is_some())
}

async fn migrations_table_exists(pool: &PgPool) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = 'public' AND table_name = '_sqlx_migrations'
        )",
    )
    .fetch_one(pool)
    .await
}
