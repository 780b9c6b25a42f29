//! User account lifecycle: registration, updates, and the role/support-type
//! invariant.

use medtrack_core::error::CoreError;
use medtrack_core::password;
use medtrack_core::roles::{self, UserRole};
use medtrack_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{classify, classify_validation, DbResult};
use crate::models::user::{CreateUser, RegisterUser, UpdateUser, User, UserResponse};
use crate::repositories::UserRepo;

/// Register a user account.
///
/// Validates the email, enforces the support-type invariant, checks password
/// strength, and stores an Argon2id hash in place of the plaintext.
pub async fn create(pool: &PgPool, input: &RegisterUser) -> DbResult<User> {
    input.validate().map_err(classify_validation)?;

    let role = UserRole::from_str(&input.role)?;
    roles::validate_support_type(role, input.support_type.as_deref())?;

    password::check_strength(&input.password)?;
    let password_hash = password::hash(&input.password)?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: input.email.clone(),
            full_name: input.full_name.clone(),
            role: role.as_str().to_string(),
            support_type: input.support_type.clone(),
            password_hash,
            department_id: input.department_id,
        },
    )
    .await
    .map_err(classify)?;

    tracing::info!(user = %user.email, role = %user.role, "user created");
    Ok(user)
}

/// Fetch a user in its external-facing shape (no password hash).
pub async fn get(pool: &PgPool, id: DbId) -> DbResult<UserResponse> {
    UserRepo::find_by_id(pool, id)
        .await
        .map_err(classify)?
        .map(UserResponse::from)
        .ok_or(CoreError::NotFound { entity: "user", id })
}

/// Update a user account, re-checking the role/support-type invariant against
/// the values that will hold after the patch.
pub async fn update(pool: &PgPool, id: DbId, input: &UpdateUser) -> DbResult<User> {
    let existing = UserRepo::find_by_id(pool, id)
        .await
        .map_err(classify)?
        .ok_or(CoreError::NotFound { entity: "user", id })?;

    let effective_role_raw = input.role.as_deref().unwrap_or(&existing.role);
    let effective_role = UserRole::from_str(effective_role_raw)?;
    let effective_support = input
        .support_type
        .as_deref()
        .or(existing.support_type.as_deref());
    roles::validate_support_type(effective_role, effective_support)?;

    let updated = UserRepo::update(pool, id, input)
        .await
        .map_err(classify)?
        .ok_or(CoreError::NotFound { entity: "user", id })?;
    Ok(updated)
}

/// Move a user off the support role, clearing their specialization.
pub async fn demote_from_support(pool: &PgPool, id: DbId, new_role: &str) -> DbResult<User> {
    let role = UserRole::from_str(new_role)?;
    if role == UserRole::Support {
        return Err(CoreError::Validation(
            "demotion target must not be the support role".to_string(),
        ));
    }
    UserRepo::find_by_id(pool, id)
        .await
        .map_err(classify)?
        .ok_or(CoreError::NotFound { entity: "user", id })?;

    UserRepo::clear_support_type(pool, id).await.map_err(classify)?;
    let updated = UserRepo::update(
        pool,
        id,
        &UpdateUser {
            role: Some(role.as_str().to_string()),
            ..Default::default()
        },
    )
    .await
    .map_err(classify)?
    .ok_or(CoreError::NotFound { entity: "user", id })?;
    Ok(updated)
}

/// Change a user's password, storing only the hash.
pub async fn change_password(pool: &PgPool, id: DbId, new_password: &str) -> DbResult<()> {
    password::check_strength(new_password)?;
    let hash = password::hash(new_password)?;
    let updated = UserRepo::update_password(pool, id, &hash)
        .await
        .map_err(classify)?;
    if !updated {
        return Err(CoreError::NotFound { entity: "user", id });
    }
    Ok(())
}

/// Remove a user account. Requires super-admin rights.
///
/// Their notifications go with them; authored records survive with the user
/// reference nulled out.
pub async fn delete(pool: &PgPool, id: DbId, actor: &User) -> DbResult<()> {
    let actor_role = UserRole::from_str(&actor.role)?;
    if !roles::can_manage_users(actor_role) {
        return Err(CoreError::Forbidden(
            "Only the super admin can manage users".to_string(),
        ));
    }
    let deleted = UserRepo::delete(pool, id).await.map_err(classify)?;
    if !deleted {
        return Err(CoreError::NotFound { entity: "user", id });
    }
    Ok(())
}
