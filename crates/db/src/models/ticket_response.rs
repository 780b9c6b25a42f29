//! Ticket service-report (response) model and DTO.

use medtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `ticket_responses` table.
///
/// A ticket accumulates zero or more responses, read back in creation order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TicketResponse {
    pub id: DbId,
    pub ticket_id: DbId,
    pub engineer_user_id: Option<DbId>,
    pub engineer_name: Option<String>,
    pub diagnosis: Option<String>,
    pub action_taken: Option<String>,
    pub parts_used: Option<String>,
    pub completed_on: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a service report against a ticket.
#[derive(Debug, Deserialize)]
pub struct CreateTicketResponse {
    pub ticket_id: DbId,
    pub engineer_user_id: Option<DbId>,
    pub engineer_name: Option<String>,
    pub diagnosis: Option<String>,
    pub action_taken: Option<String>,
    pub parts_used: Option<String>,
    pub completed_on: Timestamp,
}
