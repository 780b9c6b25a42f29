//! Repository for the `ticket_responses` table.

use medtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::ticket_response::{CreateTicketResponse, TicketResponse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, ticket_id, engineer_user_id, engineer_name, diagnosis, action_taken, \
                        parts_used, completed_on, created_at, updated_at";

/// Provides operations for ticket service reports.
pub struct TicketResponseRepo;

impl TicketResponseRepo {
    /// File a service report, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTicketResponse,
    ) -> Result<TicketResponse, sqlx::Error> {
        let query = format!(
            "INSERT INTO ticket_responses (ticket_id, engineer_user_id, engineer_name, diagnosis,
                                           action_taken, parts_used, completed_on)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TicketResponse>(&query)
            .bind(input.ticket_id)
            .bind(input.engineer_user_id)
            .bind(&input.engineer_name)
            .bind(&input.diagnosis)
            .bind(&input.action_taken)
            .bind(&input.parts_used)
            .bind(input.completed_on)
            .fetch_one(pool)
            .await
    }

    /// Find a response by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TicketResponse>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ticket_responses WHERE id = $1");
        sqlx::query_as::<_, TicketResponse>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the responses filed against a ticket, in creation order.
    pub async fn list_by_ticket(
        pool: &PgPool,
        ticket_id: DbId,
    ) -> Result<Vec<TicketResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ticket_responses
             WHERE ticket_id = $1
             ORDER BY created_at"
        );
        sqlx::query_as::<_, TicketResponse>(&query)
            .bind(ticket_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a response. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ticket_responses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
