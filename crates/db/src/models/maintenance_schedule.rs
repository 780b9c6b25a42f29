//! Maintenance schedule model and DTOs.

use medtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `maintenance_schedules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaintenanceSchedule {
    pub id: DbId,
    pub equipment_id: DbId,
    pub maintenance_type: String,
    pub frequency_days: i32,
    pub last_maintenance_date: Option<Timestamp>,
    pub next_maintenance_date: Timestamp,
    pub assigned_to_user_id: Option<DbId>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a recurring maintenance schedule.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaintenanceSchedule {
    pub equipment_id: DbId,
    #[validate(length(min = 1, message = "maintenance type must not be empty"))]
    pub maintenance_type: String,
    #[validate(range(min = 1, message = "frequency must be at least one day"))]
    pub frequency_days: i32,
    pub next_maintenance_date: Timestamp,
    pub assigned_to_user_id: Option<DbId>,
    pub notes: Option<String>,
}

/// DTO for updating a schedule. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMaintenanceSchedule {
    pub maintenance_type: Option<String>,
    pub frequency_days: Option<i32>,
    pub next_maintenance_date: Option<Timestamp>,
    pub assigned_to_user_id: Option<DbId>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}
