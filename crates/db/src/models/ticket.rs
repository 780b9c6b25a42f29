//! Ticket entity model and DTOs.

use medtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ticket {
    pub id: DbId,
    pub ticket_code: String,
    pub equipment_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub reported_by_user_id: Option<DbId>,
    pub assigned_to_user_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub completed_on: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Service-level input for reporting an issue against a piece of equipment.
///
/// The ticket code, department snapshot, and reporter are filled in by the
/// ticket service.
#[derive(Debug, Deserialize, Validate)]
pub struct ReportTicket {
    pub equipment_id: DbId,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
}

/// DTO for inserting a fully-formed ticket row.
#[derive(Debug, Deserialize)]
pub struct CreateTicket {
    pub ticket_code: String,
    pub equipment_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub reported_by_user_id: Option<DbId>,
    pub department_id: Option<DbId>,
}

/// DTO for updating a ticket. All fields are optional.
///
/// `completed_on` is stamped by the ticket service when the ticket settles;
/// callers leave it unset.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTicket {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub assigned_to_user_id: Option<DbId>,
    #[serde(default)]
    pub completed_on: Option<Timestamp>,
}

/// Optional filters for ticket listings.
#[derive(Debug, Default, Deserialize)]
pub struct TicketFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to_user_id: Option<DbId>,
    pub department_id: Option<DbId>,
    /// Matches title, ticket code, or description, case-insensitively.
    pub search: Option<String>,
}
