//! Repository for the `tickets` table.

use medtrack_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::ticket::{CreateTicket, Ticket, TicketFilter, UpdateTicket};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, ticket_code, equipment_id, title, description, priority, status, \
                        reported_by_user_id, assigned_to_user_id, department_id, completed_on, \
                        created_at, updated_at";

/// Provides CRUD operations for tickets.
pub struct TicketRepo;

impl TicketRepo {
    /// Insert a new ticket, returning the created row. Status starts `open`.
    pub async fn create(pool: &PgPool, input: &CreateTicket) -> Result<Ticket, sqlx::Error> {
        let query = format!(
            "INSERT INTO tickets (ticket_code, equipment_id, title, description, priority,
                                  reported_by_user_id, department_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(&input.ticket_code)
            .bind(input.equipment_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.priority)
            .bind(input.reported_by_user_id)
            .bind(input.department_id)
            .fetch_one(pool)
            .await
    }

    /// Find a ticket by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a ticket by its unique code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE ticket_code = $1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List tickets matching the given filters, newest first.
    pub async fn list(pool: &PgPool, filter: &TicketFilter) -> Result<Vec<Ticket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tickets
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::text IS NULL OR priority = $2)
               AND ($3::uuid IS NULL OR assigned_to_user_id = $3)
               AND ($4::uuid IS NULL OR department_id = $4)
               AND ($5::text IS NULL
                    OR title ILIKE '%' || $5 || '%'
                    OR ticket_code ILIKE '%' || $5 || '%'
                    OR description ILIKE '%' || $5 || '%')
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(&filter.status)
            .bind(&filter.priority)
            .bind(filter.assigned_to_user_id)
            .bind(filter.department_id)
            .bind(&filter.search)
            .fetch_all(pool)
            .await
    }

    /// List tickets reported by a user, newest first.
    pub async fn list_by_reporter(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tickets
             WHERE reported_by_user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a ticket. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. Status strings are
    /// validated by the ticket service before they reach this method.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTicket,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                status = COALESCE($5, status),
                assigned_to_user_id = COALESCE($6, assigned_to_user_id),
                completed_on = COALESCE($7, completed_on),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.priority)
            .bind(&input.status)
            .bind(input.assigned_to_user_id)
            .bind(input.completed_on)
            .fetch_optional(pool)
            .await
    }

    /// Set the status column and optionally the completion timestamp.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        completed_on: Option<Timestamp>,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets SET
                status = $2,
                completed_on = COALESCE($3, completed_on),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(status)
            .bind(completed_on)
            .fetch_optional(pool)
            .await
    }

    /// Delete a ticket. Returns `true` if a row was removed.
    ///
    /// Its responses are removed with it; history rows survive with the
    /// ticket reference nulled out.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
