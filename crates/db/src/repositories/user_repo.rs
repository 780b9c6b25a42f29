//! Repository for the `users` table.

use medtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, full_name, role, support_type, is_active, \
                        password_hash, department_id, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, full_name, role, support_type, password_hash, department_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(&input.role)
            .bind(&input.support_type)
            .bind(&input.password_hash)
            .bind(input.department_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// List active users holding any of the given roles.
    ///
    /// Used by the notification fan-outs to address staff groups.
    pub async fn list_active_by_roles(
        pool: &PgPool,
        roles: &[&str],
    ) -> Result<Vec<User>, sqlx::Error> {
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE role = ANY($1) AND is_active = true
             ORDER BY created_at"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&roles)
            .fetch_all(pool)
            .await
    }

    /// List active users affiliated with a department.
    pub async fn list_active_by_department(
        pool: &PgPool,
        department_id: DbId,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE department_id = $1 AND is_active = true
             ORDER BY created_at"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(department_id)
            .fetch_all(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                email = COALESCE($2, email),
                full_name = COALESCE($3, full_name),
                role = COALESCE($4, role),
                support_type = COALESCE($5, support_type),
                is_active = COALESCE($6, is_active),
                department_id = COALESCE($7, department_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(&input.role)
            .bind(&input.support_type)
            .bind(input.is_active)
            .bind(input.department_id)
            .fetch_optional(pool)
            .await
    }

    /// Clear a support specialization. COALESCE updates cannot null a column,
    /// so role downgrades use this explicitly.
    pub async fn clear_support_type(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET support_type = NULL, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a user. Returns `true` if a row was removed.
    ///
    /// Their notifications are removed with them; authored logs, tickets, and
    /// responses survive with the user reference nulled out.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
