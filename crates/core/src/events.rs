//! Well-known notification event type constants and message builders.
//!
//! These must match the values stored in the `notifications.notification_type`
//! column. The builders produce the user-facing title/message pairs so that
//! wording stays consistent across every code path that fans out a
//! notification.

// ---------------------------------------------------------------------------
// Event type constants
// ---------------------------------------------------------------------------

pub const EVENT_TICKET_CREATED: &str = "ticket_created";
pub const EVENT_TICKET_ASSIGNED: &str = "ticket_assigned";
pub const EVENT_TICKET_STATUS_CHANGED: &str = "ticket_status_changed";
pub const EVENT_EQUIPMENT_STATUS_CHANGED: &str = "equipment_status_changed";
pub const EVENT_MAINTENANCE_DUE: &str = "maintenance_due";
pub const EVENT_MAINTENANCE_OVERDUE: &str = "maintenance_overdue";
pub const EVENT_MAINTENANCE_COMPLETED: &str = "maintenance_completed";

/// All valid notification event types.
pub const VALID_EVENT_TYPES: &[&str] = &[
    EVENT_TICKET_CREATED,
    EVENT_TICKET_ASSIGNED,
    EVENT_TICKET_STATUS_CHANGED,
    EVENT_EQUIPMENT_STATUS_CHANGED,
    EVENT_MAINTENANCE_DUE,
    EVENT_MAINTENANCE_OVERDUE,
    EVENT_MAINTENANCE_COMPLETED,
];

// ---------------------------------------------------------------------------
// Related entity type constants
// ---------------------------------------------------------------------------

pub const ENTITY_TICKET: &str = "ticket";
pub const ENTITY_EQUIPMENT: &str = "equipment";
pub const ENTITY_MAINTENANCE: &str = "maintenance";

// ---------------------------------------------------------------------------
// Message builders
// ---------------------------------------------------------------------------

/// Render a snake_case status value for display: `in_progress` -> `In Progress`.
pub fn humanize(value: &str) -> String {
    value
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn ticket_created_message(ticket_code: &str, title: &str) -> String {
    format!("New ticket #{ticket_code}: {title}")
}

pub fn ticket_assigned_message(ticket_code: &str, title: &str) -> String {
    format!("You have been assigned to ticket #{ticket_code}: {title}")
}

/// Full status-change wording, shown to the reporter.
pub fn ticket_status_changed_message(ticket_code: &str, old_status: &str, new_status: &str) -> String {
    format!(
        "Ticket #{ticket_code} status changed from {} to {}",
        humanize(old_status),
        humanize(new_status)
    )
}

/// Short status-change wording, shown to the assignee.
pub fn ticket_status_brief_message(ticket_code: &str, new_status: &str) -> String {
    format!(
        "Ticket #{ticket_code} status changed to {}",
        humanize(new_status)
    )
}

/// Wording for the manager fan-out when a ticket settles.
pub fn ticket_settled_message(ticket_code: &str, new_status: &str) -> String {
    format!("Ticket #{ticket_code} has been {new_status}")
}

pub fn equipment_status_changed_message(device_name: &str, asset_tag: &str, new_status: &str) -> String {
    format!(
        "{device_name} ({asset_tag}) status changed to {}",
        humanize(new_status)
    )
}

pub fn maintenance_due_message(maintenance_type: &str, device_name: &str, days_until: i64) -> String {
    format!("{maintenance_type} for {device_name} is due in {days_until} days")
}

pub fn maintenance_overdue_message(
    maintenance_type: &str,
    device_name: &str,
    days_overdue: i64,
) -> String {
    format!("{maintenance_type} for {device_name} is overdue by {days_overdue} days")
}

pub fn maintenance_completed_message(maintenance_type: &str, device_name: &str) -> String {
    format!("{maintenance_type} completed for {device_name}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
