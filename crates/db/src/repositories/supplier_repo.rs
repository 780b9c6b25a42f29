//! Repository for the `suppliers` table.

use medtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::supplier::{CreateSupplier, Supplier, UpdateSupplier};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, contact_person, email, phone, address, \
                        website, notes, created_at, updated_at";

/// Provides CRUD operations for suppliers.
pub struct SupplierRepo;

impl SupplierRepo {
    /// Insert a new supplier, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSupplier) -> Result<Supplier, sqlx::Error> {
        let query = format!(
            "INSERT INTO suppliers (name, code, contact_person, email, phone, address, website, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Supplier>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.contact_person)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.website)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a supplier by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Supplier>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM suppliers WHERE id = $1");
        sqlx::query_as::<_, Supplier>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a supplier by its unique name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Supplier>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM suppliers WHERE name = $1");
        sqlx::query_as::<_, Supplier>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all suppliers ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Supplier>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM suppliers ORDER BY name");
        sqlx::query_as::<_, Supplier>(&query).fetch_all(pool).await
    }

    /// Update a supplier. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSupplier,
    ) -> Result<Option<Supplier>, sqlx::Error> {
        let query = format!(
            "UPDATE suppliers SET
                name = COALESCE($2, name),
                code = COALESCE($3, code),
                contact_person = COALESCE($4, contact_person),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                address = COALESCE($7, address),
                website = COALESCE($8, website),
                notes = COALESCE($9, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Supplier>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.contact_person)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.website)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a supplier. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
