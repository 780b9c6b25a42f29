//! Ticket lifecycle: reporting, status transitions, service reports, and the
//! bookkeeping that follows a settled ticket.

use chrono::Utc;
use medtrack_core::error::CoreError;
use medtrack_core::roles::{self, UserRole};
use medtrack_core::status::{TicketPriority, TicketStatus};
use medtrack_core::types::DbId;
use rand::Rng;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{classify, classify_validation, DbResult};
use crate::models::equipment_history::CreateEquipmentHistory;
use crate::models::ticket::{CreateTicket, ReportTicket, Ticket, UpdateTicket};
use crate::models::ticket_response::{CreateTicketResponse, TicketResponse};
use crate::models::user::User;
use crate::repositories::{
    DepartmentRepo, EquipmentHistoryRepo, EquipmentRepo, TicketRepo, TicketResponseRepo,
};
use crate::services::notification_service;

/// Characters used in generated ticket codes.
const CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Length of a generated ticket code.
const CODE_LEN: usize = 8;

fn random_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| CODE_CHARS[rng.random_range(0..CODE_CHARS.len())] as char)
        .collect()
}

/// Generate a ticket code not already present in the store.
async fn generate_ticket_code(pool: &PgPool) -> DbResult<String> {
    for _ in 0..5 {
        let code = random_code();
        if TicketRepo::find_by_code(pool, &code)
            .await
            .map_err(classify)?
            .is_none()
        {
            return Ok(code);
        }
    }
    Err(CoreError::Internal(
        "could not generate a unique ticket code".to_string(),
    ))
}

/// Report an issue against a piece of equipment.
///
/// Verifies the equipment exists, generates a unique ticket code, snapshots
/// the equipment's department onto the ticket, and notifies staff.
pub async fn create(pool: &PgPool, input: &ReportTicket, reporter: &User) -> DbResult<Ticket> {
    input.validate().map_err(classify_validation)?;

    let priority = match input.priority.as_deref() {
        Some(raw) => TicketPriority::from_str(raw)?,
        None => TicketPriority::Medium,
    };

    let equipment = EquipmentRepo::find_by_id(pool, input.equipment_id)
        .await
        .map_err(classify)?
        .ok_or(CoreError::NotFound {
            entity: "equipment",
            id: input.equipment_id,
        })?;

    let ticket_code = generate_ticket_code(pool).await?;
    let ticket = TicketRepo::create(
        pool,
        &CreateTicket {
            ticket_code,
            equipment_id: Some(equipment.id),
            title: input.title.clone(),
            description: input.description.clone(),
            priority: priority.as_str().to_string(),
            reported_by_user_id: Some(reporter.id),
            department_id: equipment.department_id,
        },
    )
    .await
    .map_err(classify)?;

    tracing::info!(ticket = %ticket.ticket_code, equipment = %equipment.asset_tag, "ticket created");
    notification_service::ticket_created(pool, &ticket, reporter.id).await?;
    Ok(ticket)
}

/// Update a ticket: field edits, assignment, and status transitions.
///
/// Status changes are checked against the transition table and the actor's
/// permissions. Entering `resolved` or `closed` from an unsettled status
/// stamps `completed_on`, increments the equipment's repair counter, and
/// appends a history record built from the latest service report.
pub async fn update(
    pool: &PgPool,
    id: DbId,
    input: &UpdateTicket,
    actor: &User,
) -> DbResult<Ticket> {
    let ticket = TicketRepo::find_by_id(pool, id)
        .await
        .map_err(classify)?
        .ok_or(CoreError::NotFound {
            entity: "ticket",
            id,
        })?;

    let actor_role = UserRole::from_str(&actor.role)?;
    let old_status = TicketStatus::from_str(&ticket.status)?;

    if let Some(raw) = input.priority.as_deref() {
        TicketPriority::from_str(raw)?;
    }

    let mut patch = UpdateTicket {
        title: input.title.clone(),
        description: input.description.clone(),
        priority: input.priority.clone(),
        status: None,
        assigned_to_user_id: input.assigned_to_user_id,
        completed_on: None,
    };

    let mut new_status = old_status;
    if let Some(raw) = input.status.as_deref() {
        new_status = TicketStatus::from_str(raw)?;
        if new_status != old_status {
            if !old_status.can_transition_to(new_status) {
                return Err(CoreError::Validation(format!(
                    "Ticket status cannot change from '{}' to '{}'",
                    old_status.as_str(),
                    new_status.as_str()
                )));
            }
            if new_status.is_settled() && !roles::can_resolve_or_close_ticket(actor_role) {
                return Err(CoreError::Forbidden(
                    "Department in-charge cannot resolve or close tickets".to_string(),
                ));
            }
            if new_status == TicketStatus::Closed && !roles::can_close_ticket(actor_role) {
                return Err(CoreError::Forbidden(
                    "Only managers can close tickets".to_string(),
                ));
            }
            patch.status = Some(new_status.as_str().to_string());
            if new_status.is_settled() && !old_status.is_settled() {
                patch.completed_on = Some(Utc::now());
            }
        }
    }

    if input.assigned_to_user_id.is_some() && !roles::can_assign_tickets(actor_role) {
        return Err(CoreError::Forbidden(
            "Only managers can assign tickets".to_string(),
        ));
    }

    let updated = TicketRepo::update(pool, id, &patch)
        .await
        .map_err(classify)?
        .ok_or(CoreError::NotFound {
            entity: "ticket",
            id,
        })?;

    // Settling bookkeeping fires once, on the unsettled -> settled edge.
    if new_status != old_status {
        if new_status.is_settled() && !old_status.is_settled() {
            settle(pool, &updated).await?;
        }
        tracing::info!(
            ticket = %updated.ticket_code,
            from = old_status.as_str(),
            to = new_status.as_str(),
            "ticket status changed"
        );
        notification_service::ticket_status_changed(
            pool,
            &updated,
            old_status.as_str(),
            new_status.as_str(),
            actor.id,
        )
        .await?;
    }

    if let Some(assignee_id) = input.assigned_to_user_id {
        if ticket.assigned_to_user_id != Some(assignee_id) {
            notification_service::ticket_assigned(pool, &updated, assignee_id, actor.id).await?;
        }
    }

    Ok(updated)
}

/// Bookkeeping for a ticket entering a settled status: bump the equipment's
/// repair counter and append a history record from the latest service report.
async fn settle(pool: &PgPool, ticket: &Ticket) -> DbResult<()> {
    let Some(equipment_id) = ticket.equipment_id else {
        return Ok(());
    };
    let Some(equipment) = EquipmentRepo::find_by_id(pool, equipment_id)
        .await
        .map_err(classify)?
    else {
        return Ok(());
    };

    EquipmentRepo::increment_repair_count(pool, equipment.id)
        .await
        .map_err(classify)?;

    let department_name = match equipment.department_id {
        Some(department_id) => DepartmentRepo::find_by_id(pool, department_id)
            .await
            .map_err(classify)?
            .map(|d| d.name)
            .unwrap_or_else(|| "Unknown".to_string()),
        None => "Unknown".to_string(),
    };

    let responses = TicketResponseRepo::list_by_ticket(pool, ticket.id)
        .await
        .map_err(classify)?;
    let latest = responses.last();

    EquipmentHistoryRepo::create(
        pool,
        &CreateEquipmentHistory {
            equipment_id: Some(equipment.id),
            department_name,
            equipment_name: equipment.device_name.clone(),
            serial: equipment.serial_number.clone(),
            ticket_id: Some(ticket.id),
            ticket_code: Some(ticket.ticket_code.clone()),
            concern: ticket
                .description
                .clone()
                .unwrap_or_else(|| ticket.title.clone()),
            diagnosis: latest.and_then(|r| r.diagnosis.clone()),
            action_taken: latest.and_then(|r| r.action_taken.clone()),
            parts_used: latest.and_then(|r| r.parts_used.clone()),
            engineer: latest.and_then(|r| r.engineer_name.clone()),
            date_completed: ticket.completed_on.unwrap_or_else(Utc::now),
        },
    )
    .await
    .map_err(classify)?;
    Ok(())
}

/// File a service report against a ticket.
///
/// The engineer name is snapshotted from the actor so the report stays
/// readable after the account is removed.
pub async fn add_response(
    pool: &PgPool,
    ticket_id: DbId,
    diagnosis: Option<String>,
    action_taken: Option<String>,
    parts_used: Option<String>,
    actor: &User,
) -> DbResult<TicketResponse> {
    let actor_role = UserRole::from_str(&actor.role)?;
    if !roles::is_support_or_above(actor_role) {
        return Err(CoreError::Forbidden(
            "Department in-charge cannot file service reports".to_string(),
        ));
    }

    TicketRepo::find_by_id(pool, ticket_id)
        .await
        .map_err(classify)?
        .ok_or(CoreError::NotFound {
            entity: "ticket",
            id: ticket_id,
        })?;

    TicketResponseRepo::create(
        pool,
        &CreateTicketResponse {
            ticket_id,
            engineer_user_id: Some(actor.id),
            engineer_name: Some(actor.full_name.clone()),
            diagnosis,
            action_taken,
            parts_used,
            completed_on: Utc::now(),
        },
    )
    .await
    .map_err(classify)
}

/// Delete a ticket. Responses cascade; history keeps its snapshot.
pub async fn delete(pool: &PgPool, id: DbId, actor: &User) -> DbResult<()> {
    let actor_role = UserRole::from_str(&actor.role)?;
    if !roles::is_manager_or_above(actor_role) {
        return Err(CoreError::Forbidden(
            "Only managers can delete tickets".to_string(),
        ));
    }
    let deleted = TicketRepo::delete(pool, id).await.map_err(classify)?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "ticket",
            id,
        });
    }
    Ok(())
}
