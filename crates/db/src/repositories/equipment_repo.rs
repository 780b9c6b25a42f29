//! Repository for the `equipment` table.

use medtrack_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::equipment::{CreateEquipment, Equipment, EquipmentFilter, UpdateEquipment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, asset_tag, serial_number, device_name, manufacturer, model, \
                        supplier_id, acquisition_date, acquired_value, status, location_id, \
                        department_id, in_service_date, notes, repair_count, \
                        total_downtime_minutes, last_downtime_start, is_currently_down, \
                        criticality, created_at, updated_at";

/// Provides CRUD operations and bookkeeping helpers for equipment.
pub struct EquipmentRepo;

impl EquipmentRepo {
    /// Insert new equipment, returning the created row.
    ///
    /// `status` and `criticality` fall back to `active` / `medium` when unset.
    pub async fn create(pool: &PgPool, input: &CreateEquipment) -> Result<Equipment, sqlx::Error> {
        let query = format!(
            "INSERT INTO equipment (asset_tag, serial_number, device_name, manufacturer, model,
                                    supplier_id, acquisition_date, acquired_value, status,
                                    location_id, department_id, in_service_date, notes, criticality)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 'active'),
                     $10, $11, $12, $13, COALESCE($14, 'medium'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(&input.asset_tag)
            .bind(&input.serial_number)
            .bind(&input.device_name)
            .bind(&input.manufacturer)
            .bind(&input.model)
            .bind(input.supplier_id)
            .bind(input.acquisition_date)
            .bind(&input.acquired_value)
            .bind(&input.status)
            .bind(input.location_id)
            .bind(input.department_id)
            .bind(input.in_service_date)
            .bind(&input.notes)
            .bind(&input.criticality)
            .fetch_one(pool)
            .await
    }

    /// Find equipment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment WHERE id = $1");
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find equipment by its unique asset tag.
    pub async fn find_by_asset_tag(
        pool: &PgPool,
        asset_tag: &str,
    ) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment WHERE asset_tag = $1");
        sqlx::query_as::<_, Equipment>(&query)
            .bind(asset_tag)
            .fetch_optional(pool)
            .await
    }

    /// List equipment matching the given filters, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &EquipmentFilter,
    ) -> Result<Vec<Equipment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM equipment
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::uuid IS NULL OR department_id = $2)
               AND ($3::text IS NULL
                    OR device_name ILIKE '%' || $3 || '%'
                    OR asset_tag ILIKE '%' || $3 || '%'
                    OR serial_number ILIKE '%' || $3 || '%')
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(&filter.status)
            .bind(filter.department_id)
            .bind(&filter.search)
            .fetch_all(pool)
            .await
    }

    /// Update descriptive fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEquipment,
    ) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!(
            "UPDATE equipment SET
                asset_tag = COALESCE($2, asset_tag),
                serial_number = COALESCE($3, serial_number),
                device_name = COALESCE($4, device_name),
                manufacturer = COALESCE($5, manufacturer),
                model = COALESCE($6, model),
                supplier_id = COALESCE($7, supplier_id),
                acquisition_date = COALESCE($8, acquisition_date),
                acquired_value = COALESCE($9, acquired_value),
                location_id = COALESCE($10, location_id),
                department_id = COALESCE($11, department_id),
                in_service_date = COALESCE($12, in_service_date),
                notes = COALESCE($13, notes),
                criticality = COALESCE($14, criticality),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .bind(&input.asset_tag)
            .bind(&input.serial_number)
            .bind(&input.device_name)
            .bind(&input.manufacturer)
            .bind(&input.model)
            .bind(input.supplier_id)
            .bind(input.acquisition_date)
            .bind(&input.acquired_value)
            .bind(input.location_id)
            .bind(input.department_id)
            .bind(input.in_service_date)
            .bind(&input.notes)
            .bind(&input.criticality)
            .fetch_optional(pool)
            .await
    }

    /// Set the status column. Returns `None` if no row exists.
    ///
    /// Transition validation and downtime bookkeeping are handled by the
    /// equipment service before this is called.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!(
            "UPDATE equipment SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Increment the repair counter by 1.
    pub async fn increment_repair_count(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE equipment SET repair_count = repair_count + 1, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Add minutes onto the running downtime total.
    pub async fn add_downtime_minutes(
        pool: &PgPool,
        id: DbId,
        minutes: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE equipment SET
                total_downtime_minutes = total_downtime_minutes + $2,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(minutes)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark equipment as currently down, stamping the downtime start.
    pub async fn begin_downtime(
        pool: &PgPool,
        id: DbId,
        at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE equipment SET
                is_currently_down = true,
                last_downtime_start = $2,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark equipment as back up, folding the elapsed downtime into the total.
    pub async fn end_downtime(pool: &PgPool, id: DbId, minutes: i32) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE equipment SET
                is_currently_down = false,
                last_downtime_start = NULL,
                total_downtime_minutes = total_downtime_minutes + $2,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(minutes)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete equipment. Returns `true` if a row was removed.
    ///
    /// Logs and maintenance schedules are removed with it; tickets and history
    /// survive with the equipment reference nulled out.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
