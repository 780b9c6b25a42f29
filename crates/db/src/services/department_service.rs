//! Department lifecycle.

use medtrack_core::error::CoreError;
use medtrack_core::roles::{self, UserRole};
use medtrack_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{classify, classify_validation, DbResult};
use crate::models::department::{CreateDepartment, Department, UpdateDepartment};
use crate::models::user::User;
use crate::repositories::DepartmentRepo;

/// Create a department. Requires super-admin rights.
pub async fn create(pool: &PgPool, input: &CreateDepartment, actor: &User) -> DbResult<Department> {
    let actor_role = UserRole::from_str(&actor.role)?;
    if !roles::can_manage_departments(actor_role) {
        return Err(CoreError::Forbidden(
            "Only the super admin can manage departments".to_string(),
        ));
    }
    input.validate().map_err(classify_validation)?;
    DepartmentRepo::create(pool, input).await.map_err(classify)
}

/// Update a department.
pub async fn update(pool: &PgPool, id: DbId, input: &UpdateDepartment) -> DbResult<Department> {
    DepartmentRepo::update(pool, id, input)
        .await
        .map_err(classify)?
        .ok_or(CoreError::NotFound {
            entity: "department",
            id,
        })
}

/// Remove a department. Requires super-admin rights.
///
/// Users, locations, equipment, and tickets that referenced it survive with
/// their department reference nulled out.
pub async fn delete(pool: &PgPool, id: DbId, actor: &User) -> DbResult<()> {
    let actor_role = UserRole::from_str(&actor.role)?;
    if !roles::can_manage_departments(actor_role) {
        return Err(CoreError::Forbidden(
            "Only the super admin can manage departments".to_string(),
        ));
    }
    let deleted = DepartmentRepo::delete(pool, id).await.map_err(classify)?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "department",
            id,
        });
    }
    tracing::info!(department = %id, "department deleted");
    Ok(())
}
