//! Repository for the `equipment_logs` table.

use medtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::equipment_log::{CreateEquipmentLog, EquipmentLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, equipment_id, created_by_user_id, log_type, title, description, \
                        occurred_at, downtime_minutes, resolved, created_at, updated_at";

/// Provides operations for equipment service logs.
pub struct EquipmentLogRepo;

impl EquipmentLogRepo {
    /// Insert a new log entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEquipmentLog,
    ) -> Result<EquipmentLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO equipment_logs (equipment_id, created_by_user_id, log_type, title,
                                         description, occurred_at, downtime_minutes, resolved)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), COALESCE($8, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EquipmentLog>(&query)
            .bind(input.equipment_id)
            .bind(input.created_by_user_id)
            .bind(&input.log_type)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.occurred_at)
            .bind(input.downtime_minutes)
            .bind(input.resolved)
            .fetch_one(pool)
            .await
    }

    /// Find a log entry by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<EquipmentLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment_logs WHERE id = $1");
        sqlx::query_as::<_, EquipmentLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List log entries for a piece of equipment, newest first.
    pub async fn list_by_equipment(
        pool: &PgPool,
        equipment_id: DbId,
    ) -> Result<Vec<EquipmentLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM equipment_logs
             WHERE equipment_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, EquipmentLog>(&query)
            .bind(equipment_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a log entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM equipment_logs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
