//! Historical repair record model and DTO.
//!
//! History rows denormalise the department and equipment names so the record
//! stays meaningful after the referenced asset or ticket is removed; the
//! structured references are nulled out on deletion.

use medtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `equipment_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EquipmentHistory {
    pub id: DbId,
    pub equipment_id: Option<DbId>,
    pub department_name: String,
    pub equipment_name: String,
    pub serial: Option<String>,
    pub ticket_id: Option<DbId>,
    pub ticket_code: Option<String>,
    pub concern: String,
    pub diagnosis: Option<String>,
    pub action_taken: Option<String>,
    pub parts_used: Option<String>,
    pub engineer: Option<String>,
    pub date_completed: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for appending a history record.
#[derive(Debug, Deserialize)]
pub struct CreateEquipmentHistory {
    pub equipment_id: Option<DbId>,
    pub department_name: String,
    pub equipment_name: String,
    pub serial: Option<String>,
    pub ticket_id: Option<DbId>,
    pub ticket_code: Option<String>,
    pub concern: String,
    pub diagnosis: Option<String>,
    pub action_taken: Option<String>,
    pub parts_used: Option<String>,
    pub engineer: Option<String>,
    pub date_completed: Timestamp,
}
