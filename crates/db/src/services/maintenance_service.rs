//! Maintenance schedule lifecycle: creation, completion, and due-date
//! notification sweeps.

use chrono::{Duration, Utc};
use medtrack_core::error::CoreError;
use medtrack_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{classify, classify_validation, DbResult};
use crate::models::maintenance_schedule::{CreateMaintenanceSchedule, MaintenanceSchedule};
use crate::models::user::User;
use crate::repositories::{EquipmentRepo, MaintenanceScheduleRepo};
use crate::services::notification_service;

/// Window ahead of the due date in which assignees are reminded.
const DUE_SOON_DAYS: i64 = 7;

/// Create a recurring maintenance schedule for a piece of equipment.
pub async fn create(
    pool: &PgPool,
    input: &CreateMaintenanceSchedule,
) -> DbResult<MaintenanceSchedule> {
    input.validate().map_err(classify_validation)?;

    EquipmentRepo::find_by_id(pool, input.equipment_id)
        .await
        .map_err(classify)?
        .ok_or(CoreError::NotFound {
            entity: "equipment",
            id: input.equipment_id,
        })?;

    MaintenanceScheduleRepo::create(pool, input)
        .await
        .map_err(classify)
}

/// Mark a maintenance pass as completed.
///
/// Stamps `last_maintenance_date` with the completion time, advances
/// `next_maintenance_date` by the schedule's frequency, and notifies managers.
pub async fn complete(pool: &PgPool, id: DbId, actor: &User) -> DbResult<MaintenanceSchedule> {
    let schedule = MaintenanceScheduleRepo::find_by_id(pool, id)
        .await
        .map_err(classify)?
        .ok_or(CoreError::NotFound {
            entity: "maintenance schedule",
            id,
        })?;

    let now = Utc::now();
    let next_due = now + Duration::days(i64::from(schedule.frequency_days));
    let updated = MaintenanceScheduleRepo::complete(pool, id, now, next_due)
        .await
        .map_err(classify)?
        .ok_or(CoreError::NotFound {
            entity: "maintenance schedule",
            id,
        })?;

    tracing::info!(
        schedule = %updated.id,
        maintenance_type = %updated.maintenance_type,
        "maintenance completed"
    );

    if let Some(equipment) = EquipmentRepo::find_by_id(pool, updated.equipment_id)
        .await
        .map_err(classify)?
    {
        notification_service::maintenance_completed(pool, &updated, &equipment, actor.id).await?;
    }
    Ok(updated)
}

/// Sweep active schedules and notify assignees of work due within the next
/// seven days or already overdue. Returns the number of notifications sent.
pub async fn notify_due(pool: &PgPool) -> DbResult<usize> {
    let now = Utc::now();
    let until = now + Duration::days(DUE_SOON_DAYS);
    let due = MaintenanceScheduleRepo::list_due(pool, until)
        .await
        .map_err(classify)?;

    let mut sent = 0;
    for schedule in &due {
        let Some(equipment) = EquipmentRepo::find_by_id(pool, schedule.equipment_id)
            .await
            .map_err(classify)?
        else {
            continue;
        };
        if notification_service::maintenance_due(pool, schedule, &equipment, now)
            .await?
            .is_some()
        {
            sent += 1;
        }
    }
    tracing::debug!(schedules = due.len(), notified = sent, "maintenance due sweep");
    Ok(sent)
}
