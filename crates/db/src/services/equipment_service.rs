//! Equipment lifecycle: registration, status transitions with downtime
//! bookkeeping, and service-log recording.

use chrono::Utc;
use medtrack_core::error::CoreError;
use medtrack_core::roles::{self, UserRole};
use medtrack_core::status::{Criticality, EquipmentStatus, LogType};
use medtrack_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{classify, classify_validation, DbResult};
use crate::models::equipment::{CreateEquipment, Equipment, UpdateEquipment};
use crate::models::equipment_log::{CreateEquipmentLog, EquipmentLog};
use crate::repositories::{EquipmentLogRepo, EquipmentRepo};
use crate::services::notification_service;

use crate::models::user::User;

/// Register new equipment.
pub async fn create(pool: &PgPool, input: &CreateEquipment, actor: &User) -> DbResult<Equipment> {
    let actor_role = UserRole::from_str(&actor.role)?;
    if !roles::can_create_equipment(actor_role) {
        return Err(CoreError::Forbidden(
            "Department head access required to register equipment".to_string(),
        ));
    }
    input.validate().map_err(classify_validation)?;
    if let Some(raw) = input.status.as_deref() {
        EquipmentStatus::from_str(raw)?;
    }
    if let Some(raw) = input.criticality.as_deref() {
        Criticality::from_str(raw)?;
    }
    EquipmentRepo::create(pool, input).await.map_err(classify)
}

/// Update descriptive equipment fields.
pub async fn update(pool: &PgPool, id: DbId, input: &UpdateEquipment) -> DbResult<Equipment> {
    if let Some(raw) = input.criticality.as_deref() {
        Criticality::from_str(raw)?;
    }
    EquipmentRepo::update(pool, id, input)
        .await
        .map_err(classify)?
        .ok_or(CoreError::NotFound {
            entity: "equipment",
            id,
        })
}

/// Change equipment status, maintaining the downtime ledger.
///
/// Entering `out_of_service` stamps the downtime start; leaving it folds the
/// elapsed minutes into the running total. Department users and staff are
/// notified of the change.
pub async fn set_status(
    pool: &PgPool,
    id: DbId,
    new_status_raw: &str,
    actor: &User,
) -> DbResult<Equipment> {
    let actor_role = UserRole::from_str(&actor.role)?;
    if !roles::can_update_equipment_status(actor_role) {
        return Err(CoreError::Forbidden(
            "Department head access required to change equipment status".to_string(),
        ));
    }

    let equipment = EquipmentRepo::find_by_id(pool, id)
        .await
        .map_err(classify)?
        .ok_or(CoreError::NotFound {
            entity: "equipment",
            id,
        })?;

    let old_status = EquipmentStatus::from_str(&equipment.status)?;
    let new_status = EquipmentStatus::from_str(new_status_raw)?;
    if new_status == old_status {
        return Ok(equipment);
    }
    if !old_status.can_transition_to(new_status) {
        return Err(CoreError::Validation(format!(
            "Equipment status cannot change from '{}' to '{}'",
            old_status.as_str(),
            new_status.as_str()
        )));
    }

    let now = Utc::now();
    if new_status == EquipmentStatus::OutOfService {
        EquipmentRepo::begin_downtime(pool, id, now)
            .await
            .map_err(classify)?;
    } else if old_status == EquipmentStatus::OutOfService {
        let minutes = equipment
            .last_downtime_start
            .map(|start| (now - start).num_minutes().max(0) as i32)
            .unwrap_or(0);
        EquipmentRepo::end_downtime(pool, id, minutes)
            .await
            .map_err(classify)?;
    }

    let updated = EquipmentRepo::set_status(pool, id, new_status.as_str())
        .await
        .map_err(classify)?
        .ok_or(CoreError::NotFound {
            entity: "equipment",
            id,
        })?;

    tracing::info!(
        asset_tag = %updated.asset_tag,
        from = old_status.as_str(),
        to = new_status.as_str(),
        "equipment status changed"
    );
    notification_service::equipment_status_changed(pool, &updated, new_status.as_str(), actor.id)
        .await?;
    Ok(updated)
}

/// Record a service/maintenance log entry against a piece of equipment.
///
/// Logged downtime is added onto the equipment's running total.
pub async fn record_log(pool: &PgPool, input: &CreateEquipmentLog) -> DbResult<EquipmentLog> {
    input.validate().map_err(classify_validation)?;
    LogType::from_str(&input.log_type)?;

    EquipmentRepo::find_by_id(pool, input.equipment_id)
        .await
        .map_err(classify)?
        .ok_or(CoreError::NotFound {
            entity: "equipment",
            id: input.equipment_id,
        })?;

    let log = EquipmentLogRepo::create(pool, input).await.map_err(classify)?;
    if log.downtime_minutes > 0 {
        EquipmentRepo::add_downtime_minutes(pool, log.equipment_id, log.downtime_minutes)
            .await
            .map_err(classify)?;
    }
    Ok(log)
}

/// Dispose of equipment. Logs and schedules cascade away; tickets and history
/// survive with their references nulled.
pub async fn delete(pool: &PgPool, id: DbId, actor: &User) -> DbResult<()> {
    let actor_role = UserRole::from_str(&actor.role)?;
    if !roles::can_delete_equipment(actor_role) {
        return Err(CoreError::Forbidden(
            "Only the super admin can delete equipment".to_string(),
        ));
    }
    let deleted = EquipmentRepo::delete(pool, id).await.map_err(classify)?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "equipment",
            id,
        });
    }
    Ok(())
}
