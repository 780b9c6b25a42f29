//! Location entity model and DTOs.

use medtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub name: String,
    pub code: Option<String>,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub room: Option<String>,
    pub department_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new location.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocation {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub code: Option<String>,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub room: Option<String>,
    pub department_id: Option<DbId>,
}

/// DTO for updating an existing location. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateLocation {
    pub name: Option<String>,
    pub code: Option<String>,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub room: Option<String>,
    pub department_id: Option<DbId>,
}
