//! Repository for the `maintenance_schedules` table.

use medtrack_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::maintenance_schedule::{
    CreateMaintenanceSchedule, MaintenanceSchedule, UpdateMaintenanceSchedule,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, equipment_id, maintenance_type, frequency_days, \
                        last_maintenance_date, next_maintenance_date, assigned_to_user_id, \
                        notes, is_active, created_at, updated_at";

/// Provides CRUD operations for maintenance schedules.
pub struct MaintenanceScheduleRepo;

impl MaintenanceScheduleRepo {
    /// Insert a new schedule, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMaintenanceSchedule,
    ) -> Result<MaintenanceSchedule, sqlx::Error> {
        let query = format!(
            "INSERT INTO maintenance_schedules (equipment_id, maintenance_type, frequency_days,
                                                next_maintenance_date, assigned_to_user_id, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceSchedule>(&query)
            .bind(input.equipment_id)
            .bind(&input.maintenance_type)
            .bind(input.frequency_days)
            .bind(input.next_maintenance_date)
            .bind(input.assigned_to_user_id)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a schedule by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaintenanceSchedule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maintenance_schedules WHERE id = $1");
        sqlx::query_as::<_, MaintenanceSchedule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List schedules for a piece of equipment, soonest due first.
    pub async fn list_by_equipment(
        pool: &PgPool,
        equipment_id: DbId,
    ) -> Result<Vec<MaintenanceSchedule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_schedules
             WHERE equipment_id = $1
             ORDER BY next_maintenance_date"
        );
        sqlx::query_as::<_, MaintenanceSchedule>(&query)
            .bind(equipment_id)
            .fetch_all(pool)
            .await
    }

    /// List all active schedules, soonest due first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<MaintenanceSchedule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_schedules
             WHERE is_active = true
             ORDER BY next_maintenance_date"
        );
        sqlx::query_as::<_, MaintenanceSchedule>(&query)
            .fetch_all(pool)
            .await
    }

    /// List active schedules due on or before `until` (including overdue).
    pub async fn list_due(
        pool: &PgPool,
        until: Timestamp,
    ) -> Result<Vec<MaintenanceSchedule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_schedules
             WHERE is_active = true AND next_maintenance_date <= $1
             ORDER BY next_maintenance_date"
        );
        sqlx::query_as::<_, MaintenanceSchedule>(&query)
            .bind(until)
            .fetch_all(pool)
            .await
    }

    /// List active schedules already past due at `now`.
    pub async fn list_overdue(
        pool: &PgPool,
        now: Timestamp,
    ) -> Result<Vec<MaintenanceSchedule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_schedules
             WHERE is_active = true AND next_maintenance_date < $1
             ORDER BY next_maintenance_date"
        );
        sqlx::query_as::<_, MaintenanceSchedule>(&query)
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Update a schedule. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMaintenanceSchedule,
    ) -> Result<Option<MaintenanceSchedule>, sqlx::Error> {
        let query = format!(
            "UPDATE maintenance_schedules SET
                maintenance_type = COALESCE($2, maintenance_type),
                frequency_days = COALESCE($3, frequency_days),
                next_maintenance_date = COALESCE($4, next_maintenance_date),
                assigned_to_user_id = COALESCE($5, assigned_to_user_id),
                notes = COALESCE($6, notes),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceSchedule>(&query)
            .bind(id)
            .bind(&input.maintenance_type)
            .bind(input.frequency_days)
            .bind(input.next_maintenance_date)
            .bind(input.assigned_to_user_id)
            .bind(&input.notes)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Record a completed maintenance pass: stamp the last date and advance
    /// the next due date. Returns `None` if no row exists.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        completed_at: Timestamp,
        next_due: Timestamp,
    ) -> Result<Option<MaintenanceSchedule>, sqlx::Error> {
        let query = format!(
            "UPDATE maintenance_schedules SET
                last_maintenance_date = $2,
                next_maintenance_date = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceSchedule>(&query)
            .bind(id)
            .bind(completed_at)
            .bind(next_due)
            .fetch_optional(pool)
            .await
    }

    /// Delete a schedule. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM maintenance_schedules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
