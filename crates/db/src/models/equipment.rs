//! Equipment entity model and DTOs.

use medtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `equipment` table.
///
/// `repair_count`, the downtime fields, and `status` are maintained by the
/// service layer; direct updates go through the dedicated repository helpers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Equipment {
    pub id: DbId,
    pub asset_tag: String,
    pub serial_number: Option<String>,
    pub device_name: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub supplier_id: Option<DbId>,
    pub acquisition_date: Option<Timestamp>,
    /// Stored as a string to carry the original currency formatting.
    pub acquired_value: Option<String>,
    pub status: String,
    pub location_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub in_service_date: Option<Timestamp>,
    pub notes: Option<String>,
    pub repair_count: i32,
    pub total_downtime_minutes: i32,
    pub last_downtime_start: Option<Timestamp>,
    pub is_currently_down: bool,
    pub criticality: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating new equipment.
///
/// `status` and `criticality` fall back to the database defaults
/// (`active` / `medium`) when omitted.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "asset tag must not be empty"))]
    pub asset_tag: String,
    pub serial_number: Option<String>,
    #[validate(length(min = 1, message = "device name must not be empty"))]
    pub device_name: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub supplier_id: Option<DbId>,
    pub acquisition_date: Option<Timestamp>,
    pub acquired_value: Option<String>,
    pub status: Option<String>,
    pub location_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub in_service_date: Option<Timestamp>,
    pub notes: Option<String>,
    pub criticality: Option<String>,
}

/// DTO for updating descriptive equipment fields. All fields are optional.
///
/// Status changes are excluded: they go through the status-transition service
/// so downtime bookkeeping and notifications stay consistent.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEquipment {
    pub asset_tag: Option<String>,
    pub serial_number: Option<String>,
    pub device_name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub supplier_id: Option<DbId>,
    pub acquisition_date: Option<Timestamp>,
    pub acquired_value: Option<String>,
    pub location_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub in_service_date: Option<Timestamp>,
    pub notes: Option<String>,
    pub criticality: Option<String>,
}

/// Optional filters for equipment listings.
#[derive(Debug, Default, Deserialize)]
pub struct EquipmentFilter {
    pub status: Option<String>,
    pub department_id: Option<DbId>,
    /// Matches device name, asset tag, or serial number, case-insensitively.
    pub search: Option<String>,
}
