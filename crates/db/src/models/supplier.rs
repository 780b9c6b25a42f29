//! Supplier entity model and DTOs.

use medtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `suppliers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Supplier {
    pub id: DbId,
    pub name: String,
    pub code: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new supplier.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSupplier {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub code: Option<String>,
    pub contact_person: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating an existing supplier. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSupplier {
    pub name: Option<String>,
    pub code: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
}
