//! Repository for the `locations` table.

use medtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::location::{CreateLocation, Location, UpdateLocation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, code, building, floor, room, department_id, created_at, updated_at";

/// Provides CRUD operations for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLocation) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (name, code, building, floor, room, department_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.building)
            .bind(&input.floor)
            .bind(&input.room)
            .bind(input.department_id)
            .fetch_one(pool)
            .await
    }

    /// Find a location by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all locations ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations ORDER BY name");
        sqlx::query_as::<_, Location>(&query).fetch_all(pool).await
    }

    /// List locations belonging to a department.
    pub async fn list_by_department(
        pool: &PgPool,
        department_id: DbId,
    ) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations WHERE department_id = $1 ORDER BY name"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(department_id)
            .fetch_all(pool)
            .await
    }

    /// Update a location. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "UPDATE locations SET
                name = COALESCE($2, name),
                code = COALESCE($3, code),
                building = COALESCE($4, building),
                floor = COALESCE($5, floor),
                room = COALESCE($6, room),
                department_id = COALESCE($7, department_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.building)
            .bind(&input.floor)
            .bind(&input.room)
            .bind(input.department_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a location. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
