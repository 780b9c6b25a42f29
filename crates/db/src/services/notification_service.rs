//! Notification fan-out for state-changing events.
//!
//! Addressing rules:
//! - New tickets go to active managers, support staff, and department heads,
//!   never to the creator.
//! - Assignment goes to the assignee unless they assigned themselves.
//! - Status changes go to the reporter and assignee (skipping the updater);
//!   settling a ticket additionally informs managers not already addressed.
//! - Equipment status changes go to the equipment's department users plus the
//!   staff groups, deduplicated, skipping the updater.
//! - Maintenance due/overdue goes to the schedule's assignee; completion goes
//!   to managers.

use medtrack_core::events;
use medtrack_core::roles::{ROLE_DEPARTMENT_HEAD, ROLE_MANAGER, ROLE_SUPPORT};
use medtrack_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::error::{classify, DbResult};
use crate::models::equipment::Equipment;
use crate::models::maintenance_schedule::MaintenanceSchedule;
use crate::models::notification::{CreateNotification, Notification};
use crate::models::ticket::Ticket;
use crate::repositories::{NotificationRepo, UserRepo};

/// Create a single notification.
pub async fn notify(
    pool: &PgPool,
    user_id: DbId,
    title: &str,
    message: &str,
    notification_type: &str,
    related_entity_type: Option<&str>,
    related_entity_id: Option<DbId>,
) -> DbResult<Notification> {
    NotificationRepo::create(
        pool,
        &CreateNotification {
            user_id,
            title: title.to_string(),
            message: message.to_string(),
            notification_type: notification_type.to_string(),
            related_entity_type: related_entity_type.map(|s| s.to_string()),
            related_entity_id,
        },
    )
    .await
    .map_err(classify)
}

/// Notify staff when a ticket is created. The creator is excluded.
pub async fn ticket_created(
    pool: &PgPool,
    ticket: &Ticket,
    creator_id: DbId,
) -> DbResult<Vec<Notification>> {
    let staff =
        UserRepo::list_active_by_roles(pool, &[ROLE_MANAGER, ROLE_SUPPORT, ROLE_DEPARTMENT_HEAD])
            .await
            .map_err(classify)?;

    let message = events::ticket_created_message(&ticket.ticket_code, &ticket.title);
    let mut notifications = Vec::new();
    for user in staff.iter().filter(|u| u.id != creator_id) {
        notifications.push(
            notify(
                pool,
                user.id,
                "New Ticket Created",
                &message,
                events::EVENT_TICKET_CREATED,
                Some(events::ENTITY_TICKET),
                Some(ticket.id),
            )
            .await?,
        );
    }
    tracing::debug!(ticket = %ticket.ticket_code, count = notifications.len(), "ticket_created fan-out");
    Ok(notifications)
}

/// Notify a user they were assigned to a ticket. Self-assignment is silent.
pub async fn ticket_assigned(
    pool: &PgPool,
    ticket: &Ticket,
    assignee_id: DbId,
    assigner_id: DbId,
) -> DbResult<Option<Notification>> {
    if assignee_id == assigner_id {
        return Ok(None);
    }
    let message = events::ticket_assigned_message(&ticket.ticket_code, &ticket.title);
    let notification = notify(
        pool,
        assignee_id,
        "Ticket Assigned to You",
        &message,
        events::EVENT_TICKET_ASSIGNED,
        Some(events::ENTITY_TICKET),
        Some(ticket.id),
    )
    .await?;
    Ok(Some(notification))
}

/// Notify interested parties of a ticket status change.
pub async fn ticket_status_changed(
    pool: &PgPool,
    ticket: &Ticket,
    old_status: &str,
    new_status: &str,
    updater_id: DbId,
) -> DbResult<Vec<Notification>> {
    let mut notifications = Vec::new();

    if let Some(reporter_id) = ticket.reported_by_user_id {
        if reporter_id != updater_id {
            notifications.push(
                notify(
                    pool,
                    reporter_id,
                    "Ticket Status Updated",
                    &events::ticket_status_changed_message(
                        &ticket.ticket_code,
                        old_status,
                        new_status,
                    ),
                    events::EVENT_TICKET_STATUS_CHANGED,
                    Some(events::ENTITY_TICKET),
                    Some(ticket.id),
                )
                .await?,
            );
        }
    }

    if let Some(assignee_id) = ticket.assigned_to_user_id {
        if assignee_id != updater_id {
            notifications.push(
                notify(
                    pool,
                    assignee_id,
                    "Ticket Status Updated",
                    &events::ticket_status_brief_message(&ticket.ticket_code, new_status),
                    events::EVENT_TICKET_STATUS_CHANGED,
                    Some(events::ENTITY_TICKET),
                    Some(ticket.id),
                )
                .await?,
            );
        }
    }

    // Settling a ticket informs managers who were not already addressed.
    if new_status == medtrack_core::status::TICKET_RESOLVED
        || new_status == medtrack_core::status::TICKET_CLOSED
    {
        let managers = UserRepo::list_active_by_roles(pool, &[ROLE_MANAGER])
            .await
            .map_err(classify)?;
        let title = format!("Ticket {}", events::humanize(new_status));
        let message = events::ticket_settled_message(&ticket.ticket_code, new_status);
        for manager in managers {
            if manager.id == updater_id
                || Some(manager.id) == ticket.reported_by_user_id
                || Some(manager.id) == ticket.assigned_to_user_id
            {
                continue;
            }
            notifications.push(
                notify(
                    pool,
                    manager.id,
                    &title,
                    &message,
                    events::EVENT_TICKET_STATUS_CHANGED,
                    Some(events::ENTITY_TICKET),
                    Some(ticket.id),
                )
                .await?,
            );
        }
    }

    Ok(notifications)
}

/// Notify department users and staff of an equipment status change.
pub async fn equipment_status_changed(
    pool: &PgPool,
    equipment: &Equipment,
    new_status: &str,
    updater_id: DbId,
) -> DbResult<Vec<Notification>> {
    let message = events::equipment_status_changed_message(
        &equipment.device_name,
        &equipment.asset_tag,
        new_status,
    );
    let mut notifications = Vec::new();
    let mut notified: Vec<DbId> = vec![updater_id];

    if let Some(department_id) = equipment.department_id {
        let dept_users = UserRepo::list_active_by_department(pool, department_id)
            .await
            .map_err(classify)?;
        for user in dept_users {
            if notified.contains(&user.id) {
                continue;
            }
            notified.push(user.id);
            notifications.push(
                notify(
                    pool,
                    user.id,
                    "Equipment Status Changed",
                    &message,
                    events::EVENT_EQUIPMENT_STATUS_CHANGED,
                    Some(events::ENTITY_EQUIPMENT),
                    Some(equipment.id),
                )
                .await?,
            );
        }
    }

    let staff =
        UserRepo::list_active_by_roles(pool, &[ROLE_MANAGER, ROLE_SUPPORT, ROLE_DEPARTMENT_HEAD])
            .await
            .map_err(classify)?;
    for user in staff {
        if notified.contains(&user.id) {
            continue;
        }
        notified.push(user.id);
        notifications.push(
            notify(
                pool,
                user.id,
                "Equipment Status Changed",
                &message,
                events::EVENT_EQUIPMENT_STATUS_CHANGED,
                Some(events::ENTITY_EQUIPMENT),
                Some(equipment.id),
            )
            .await?,
        );
    }

    Ok(notifications)
}

/// Notify the assignee of upcoming or overdue maintenance.
///
/// Returns `None` when the schedule has no assignee or the due date is more
/// than seven days away.
pub async fn maintenance_due(
    pool: &PgPool,
    schedule: &MaintenanceSchedule,
    equipment: &Equipment,
    now: Timestamp,
) -> DbResult<Option<Notification>> {
    let Some(assignee_id) = schedule.assigned_to_user_id else {
        return Ok(None);
    };

    let days_until = (schedule.next_maintenance_date - now).num_days();
    let (title, message, notification_type) = if days_until < 0 {
        (
            "Maintenance Overdue",
            events::maintenance_overdue_message(
                &schedule.maintenance_type,
                &equipment.device_name,
                -days_until,
            ),
            events::EVENT_MAINTENANCE_OVERDUE,
        )
    } else if days_until <= 7 {
        (
            "Maintenance Due Soon",
            events::maintenance_due_message(
                &schedule.maintenance_type,
                &equipment.device_name,
                days_until,
            ),
            events::EVENT_MAINTENANCE_DUE,
        )
    } else {
        return Ok(None);
    };

    let notification = notify(
        pool,
        assignee_id,
        title,
        &message,
        notification_type,
        Some(events::ENTITY_MAINTENANCE),
        Some(schedule.id),
    )
    .await?;
    Ok(Some(notification))
}

/// Notify managers that a maintenance pass was completed.
pub async fn maintenance_completed(
    pool: &PgPool,
    schedule: &MaintenanceSchedule,
    equipment: &Equipment,
    completer_id: DbId,
) -> DbResult<Vec<Notification>> {
    let managers = UserRepo::list_active_by_roles(pool, &[ROLE_MANAGER])
        .await
        .map_err(classify)?;
    let message =
        events::maintenance_completed_message(&schedule.maintenance_type, &equipment.device_name);

    let mut notifications = Vec::new();
    for manager in managers.iter().filter(|m| m.id != completer_id) {
        notifications.push(
            notify(
                pool,
                manager.id,
                "Maintenance Completed",
                &message,
                events::EVENT_MAINTENANCE_COMPLETED,
                Some(events::ENTITY_MAINTENANCE),
                Some(schedule.id),
            )
            .await?,
        );
    }
    Ok(notifications)
}
