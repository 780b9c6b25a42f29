//! Department entity model and DTOs.

use medtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `departments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub id: DbId,
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new department.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDepartment {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating an existing department. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDepartment {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
}
