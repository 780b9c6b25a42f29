//! Equipment service/maintenance log entry model and DTOs.

use medtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `equipment_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EquipmentLog {
    pub id: DbId,
    pub equipment_id: DbId,
    pub created_by_user_id: Option<DbId>,
    pub log_type: String,
    pub title: String,
    pub description: Option<String>,
    pub occurred_at: Option<Timestamp>,
    pub downtime_minutes: i32,
    pub resolved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a new log entry against a piece of equipment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEquipmentLog {
    pub equipment_id: DbId,
    pub created_by_user_id: Option<DbId>,
    pub log_type: String,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub occurred_at: Option<Timestamp>,
    #[validate(range(min = 0, message = "downtime must not be negative"))]
    pub downtime_minutes: Option<i32>,
    pub resolved: Option<bool>,
}
