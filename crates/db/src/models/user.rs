//! User entity model and DTOs.

use medtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to external output
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub support_type: Option<String>,
    pub is_active: bool,
    pub password_hash: String,
    pub department_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for external output (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub support_type: Option<String>,
    pub is_active: bool,
    pub department_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            support_type: user.support_type,
            is_active: user.is_active,
            department_id: user.department_id,
            created_at: user.created_at,
        }
    }
}

/// DTO for inserting a user row. The password is already hashed.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub support_type: Option<String>,
    pub password_hash: String,
    pub department_id: Option<DbId>,
}

/// Service-level input for registering a user account with a plaintext
/// password; validated and hashed before it reaches the repository.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "full name must not be empty"))]
    pub full_name: String,
    pub role: String,
    pub support_type: Option<String>,
    pub password: String,
    pub department_id: Option<DbId>,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub support_type: Option<String>,
    pub is_active: Option<bool>,
    pub department_id: Option<DbId>,
}
