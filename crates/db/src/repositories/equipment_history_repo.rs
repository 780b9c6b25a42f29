//! Repository for the `equipment_history` table.

use medtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::equipment_history::{CreateEquipmentHistory, EquipmentHistory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, equipment_id, department_name, equipment_name, serial, ticket_id, \
                        ticket_code, concern, diagnosis, action_taken, parts_used, engineer, \
                        date_completed, created_at, updated_at";

/// Provides operations for historical repair records.
pub struct EquipmentHistoryRepo;

impl EquipmentHistoryRepo {
    /// Append a history record, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEquipmentHistory,
    ) -> Result<EquipmentHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO equipment_history (equipment_id, department_name, equipment_name, serial,
                                            ticket_id, ticket_code, concern, diagnosis,
                                            action_taken, parts_used, engineer, date_completed)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EquipmentHistory>(&query)
            .bind(input.equipment_id)
            .bind(&input.department_name)
            .bind(&input.equipment_name)
            .bind(&input.serial)
            .bind(input.ticket_id)
            .bind(&input.ticket_code)
            .bind(&input.concern)
            .bind(&input.diagnosis)
            .bind(&input.action_taken)
            .bind(&input.parts_used)
            .bind(&input.engineer)
            .bind(input.date_completed)
            .fetch_one(pool)
            .await
    }

    /// Find a history record by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EquipmentHistory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment_history WHERE id = $1");
        sqlx::query_as::<_, EquipmentHistory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List history records for a piece of equipment, newest completion first.
    pub async fn list_by_equipment(
        pool: &PgPool,
        equipment_id: DbId,
    ) -> Result<Vec<EquipmentHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM equipment_history
             WHERE equipment_id = $1
             ORDER BY date_completed DESC"
        );
        sqlx::query_as::<_, EquipmentHistory>(&query)
            .bind(equipment_id)
            .fetch_all(pool)
            .await
    }

    /// List history records carrying a ticket code.
    pub async fn list_by_ticket_code(
        pool: &PgPool,
        ticket_code: &str,
    ) -> Result<Vec<EquipmentHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM equipment_history
             WHERE ticket_code = $1
             ORDER BY date_completed DESC"
        );
        sqlx::query_as::<_, EquipmentHistory>(&query)
            .bind(ticket_code)
            .fetch_all(pool)
            .await
    }

    /// Delete a history record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM equipment_history WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
