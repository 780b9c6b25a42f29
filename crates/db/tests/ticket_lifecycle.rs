//! Ticket lifecycle tests: reporting, transitions, permissions, settling
//! bookkeeping, and notification fan-out.

mod common;

use assert_matches::assert_matches;
use medtrack_core::error::CoreError;
use medtrack_core::types::DbId;
use medtrack_db::models::ticket::{ReportTicket, UpdateTicket};
use medtrack_db::repositories::{
    EquipmentHistoryRepo, EquipmentRepo, NotificationRepo, TicketRepo, TicketResponseRepo,
};
use medtrack_db::services::ticket_service;
use sqlx::PgPool;

fn report(equipment_id: DbId, title: &str) -> ReportTicket {
    ReportTicket {
        equipment_id,
        title: title.to_string(),
        description: Some("Reported during rounds.".to_string()),
        priority: None,
    }
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_ticket_generates_code_and_snapshots_department(pool: PgPool) {
    let department = common::create_department(&pool, "Emergency Department").await;
    let equipment = common::create_equipment(&pool, "EQ-ED-1", Some(department.id)).await;
    let reporter =
        common::register_user(&pool, "incharge@test.example", "department_incharge", None).await;

    let ticket = ticket_service::create(&pool, &report(equipment.id, "Monitor flatline"), &reporter)
        .await
        .unwrap();

    assert_eq!(ticket.ticket_code.len(), 8);
    assert!(ticket
        .ticket_code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    assert_eq!(ticket.status, "open");
    assert_eq!(ticket.priority, "medium"); // default
    assert_eq!(ticket.department_id, Some(department.id));
    assert_eq!(ticket.reported_by_user_id, Some(reporter.id));

    let found = TicketRepo::find_by_code(&pool, &ticket.ticket_code)
        .await
        .unwrap();
    assert!(found.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_ticket_notifies_staff_not_creator(pool: PgPool) {
    let equipment = common::create_equipment(&pool, "EQ-NOTIF-1", None).await;
    let manager = common::register_user(&pool, "mgr@test.example", "manager", None).await;
    let support =
        common::register_user(&pool, "tech@test.example", "support", Some("biomed_tech")).await;
    let secretary =
        common::register_user(&pool, "sec@test.example", "department_incharge", None).await;

    let ticket = ticket_service::create(&pool, &report(equipment.id, "Beeping"), &manager)
        .await
        .unwrap();

    // The support user is notified, the creating manager is not, and the
    // secretary holds no staff role.
    assert_eq!(NotificationRepo::unread_count(&pool, support.id).await.unwrap(), 1);
    assert_eq!(NotificationRepo::unread_count(&pool, manager.id).await.unwrap(), 0);
    assert_eq!(NotificationRepo::unread_count(&pool, secretary.id).await.unwrap(), 0);

    let notifications = NotificationRepo::list_for_user(&pool, support.id, true, 10, 0)
        .await
        .unwrap();
    assert_eq!(notifications[0].notification_type, "ticket_created");
    assert!(notifications[0].message.contains(&ticket.ticket_code));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_ticket_missing_equipment(pool: PgPool) {
    let reporter = common::register_user(&pool, "rep@test.example", "support", None).await;
    let ghost = DbId::new_v4();
    let result = ticket_service::create(&pool, &report(ghost, "Ghost device"), &reporter).await;
    assert_matches!(result, Err(CoreError::NotFound { entity: "equipment", .. }));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_ticket_invalid_priority(pool: PgPool) {
    let equipment = common::create_equipment(&pool, "EQ-PRI-1", None).await;
    let reporter = common::register_user(&pool, "rep2@test.example", "support", None).await;
    let result = ticket_service::create(
        &pool,
        &ReportTicket {
            equipment_id: equipment.id,
            title: "Bad priority".to_string(),
            description: None,
            priority: Some("critical".to_string()),
        },
        &reporter,
    )
    .await;
    assert_matches!(result, Err(CoreError::Validation(_)));

    // Nothing was persisted.
    let tickets = TicketRepo::list(&pool, &Default::default()).await.unwrap();
    assert!(tickets.is_empty());
}

// ---------------------------------------------------------------------------
// Transitions and permissions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_closed_ticket_is_terminal(pool: PgPool) {
    let equipment = common::create_equipment(&pool, "EQ-TERM-1", None).await;
    let manager = common::register_user(&pool, "mgr2@test.example", "manager", None).await;

    let ticket = ticket_service::create(&pool, &report(equipment.id, "One-way trip"), &manager)
        .await
        .unwrap();
    ticket_service::update(
        &pool,
        ticket.id,
        &UpdateTicket {
            status: Some("closed".to_string()),
            ..Default::default()
        },
        &manager,
    )
    .await
    .unwrap();

    let result = ticket_service::update(
        &pool,
        ticket.id,
        &UpdateTicket {
            status: Some("open".to_string()),
            ..Default::default()
        },
        &manager,
    )
    .await;
    assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("closed"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_secretary_cannot_resolve(pool: PgPool) {
    let equipment = common::create_equipment(&pool, "EQ-PERM-1", None).await;
    let secretary =
        common::register_user(&pool, "sec2@test.example", "department_incharge", None).await;

    let ticket = ticket_service::create(&pool, &report(equipment.id, "Perm check"), &secretary)
        .await
        .unwrap();
    let result = ticket_service::update(
        &pool,
        ticket.id,
        &UpdateTicket {
            status: Some("resolved".to_string()),
            ..Default::default()
        },
        &secretary,
    )
    .await;
    assert_matches!(result, Err(CoreError::Forbidden(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_support_cannot_close_but_can_resolve(pool: PgPool) {
    let equipment = common::create_equipment(&pool, "EQ-PERM-2", None).await;
    let support =
        common::register_user(&pool, "tech2@test.example", "support", Some("it_staff")).await;

    let ticket = ticket_service::create(&pool, &report(equipment.id, "Close check"), &support)
        .await
        .unwrap();

    let result = ticket_service::update(
        &pool,
        ticket.id,
        &UpdateTicket {
            status: Some("closed".to_string()),
            ..Default::default()
        },
        &support,
    )
    .await;
    assert_matches!(result, Err(CoreError::Forbidden(msg)) if msg.contains("managers"));

    let resolved = ticket_service::update(
        &pool,
        ticket.id,
        &UpdateTicket {
            status: Some("resolved".to_string()),
            ..Default::default()
        },
        &support,
    )
    .await
    .unwrap();
    assert_eq!(resolved.status, "resolved");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_nonexistent_ticket(pool: PgPool) {
    let manager = common::register_user(&pool, "mgr3@test.example", "manager", None).await;
    let result = ticket_service::update(
        &pool,
        DbId::new_v4(),
        &UpdateTicket::default(),
        &manager,
    )
    .await;
    assert_matches!(result, Err(CoreError::NotFound { entity: "ticket", .. }));
}

// ---------------------------------------------------------------------------
// Settling bookkeeping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_resolve_stamps_and_bumps_once(pool: PgPool) {
    let department = common::create_department(&pool, "Intensive Care Unit").await;
    let equipment = common::create_equipment(&pool, "EQ-FIX-1", Some(department.id)).await;
    let manager = common::register_user(&pool, "mgr4@test.example", "manager", None).await;
    let support =
        common::register_user(&pool, "tech3@test.example", "support", Some("biomed_tech")).await;

    let ticket = ticket_service::create(&pool, &report(equipment.id, "Pump overheating"), &manager)
        .await
        .unwrap();

    ticket_service::add_response(
        &pool,
        ticket.id,
        Some("Clogged vent".to_string()),
        Some("Cleaned vent and thermal paste".to_string()),
        Some("Thermal paste".to_string()),
        &support,
    )
    .await
    .unwrap();

    let resolved = ticket_service::update(
        &pool,
        ticket.id,
        &UpdateTicket {
            status: Some("resolved".to_string()),
            ..Default::default()
        },
        &support,
    )
    .await
    .unwrap();
    assert!(resolved.completed_on.is_some());

    let equipment = EquipmentRepo::find_by_id(&pool, equipment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(equipment.repair_count, 1);

    // History was appended from the latest response.
    let history = EquipmentHistoryRepo::list_by_ticket_code(&pool, &ticket.ticket_code)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].department_name, "Intensive Care Unit");
    assert_eq!(history[0].diagnosis.as_deref(), Some("Clogged vent"));
    assert_eq!(history[0].engineer.as_deref(), Some("Test support"));

    // Closing an already-resolved ticket does not bump the counter again.
    ticket_service::update(
        &pool,
        ticket.id,
        &UpdateTicket {
            status: Some("closed".to_string()),
            ..Default::default()
        },
        &manager,
    )
    .await
    .unwrap();
    let equipment = EquipmentRepo::find_by_id(&pool, equipment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(equipment.repair_count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reopen_and_resolve_bumps_again(pool: PgPool) {
    let equipment = common::create_equipment(&pool, "EQ-FIX-2", None).await;
    let manager = common::register_user(&pool, "mgr5@test.example", "manager", None).await;

    let ticket = ticket_service::create(&pool, &report(equipment.id, "Intermittent fault"), &manager)
        .await
        .unwrap();

    for _ in 0..2 {
        ticket_service::update(
            &pool,
            ticket.id,
            &UpdateTicket {
                status: Some("resolved".to_string()),
                ..Default::default()
            },
            &manager,
        )
        .await
        .unwrap();
        ticket_service::update(
            &pool,
            ticket.id,
            &UpdateTicket {
                status: Some("in_progress".to_string()),
                ..Default::default()
            },
            &manager,
        )
        .await
        .unwrap();
    }

    let equipment = EquipmentRepo::find_by_id(&pool, equipment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(equipment.repair_count, 2);
}

// ---------------------------------------------------------------------------
// Assignment and responses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_assignment_notifies_assignee(pool: PgPool) {
    let equipment = common::create_equipment(&pool, "EQ-ASSIGN-1", None).await;
    let manager = common::register_user(&pool, "mgr6@test.example", "manager", None).await;
    let support =
        common::register_user(&pool, "tech4@test.example", "support", Some("it_staff")).await;

    let ticket = ticket_service::create(&pool, &report(equipment.id, "Assign me"), &manager)
        .await
        .unwrap();
    let before = NotificationRepo::unread_count(&pool, support.id).await.unwrap();

    ticket_service::update(
        &pool,
        ticket.id,
        &UpdateTicket {
            assigned_to_user_id: Some(support.id),
            ..Default::default()
        },
        &manager,
    )
    .await
    .unwrap();

    let after = NotificationRepo::unread_count(&pool, support.id).await.unwrap();
    assert_eq!(after, before + 1);
    let notifications = NotificationRepo::list_for_user(&pool, support.id, true, 10, 0)
        .await
        .unwrap();
    assert!(notifications
        .iter()
        .any(|n| n.notification_type == "ticket_assigned"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_self_assignment_is_silent(pool: PgPool) {
    let equipment = common::create_equipment(&pool, "EQ-ASSIGN-2", None).await;
    let manager = common::register_user(&pool, "mgr7@test.example", "manager", None).await;

    let ticket = ticket_service::create(&pool, &report(equipment.id, "Mine now"), &manager)
        .await
        .unwrap();
    ticket_service::update(
        &pool,
        ticket.id,
        &UpdateTicket {
            assigned_to_user_id: Some(manager.id),
            ..Default::default()
        },
        &manager,
    )
    .await
    .unwrap();

    assert_eq!(NotificationRepo::unread_count(&pool, manager.id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_support_cannot_assign(pool: PgPool) {
    let equipment = common::create_equipment(&pool, "EQ-ASSIGN-3", None).await;
    let support =
        common::register_user(&pool, "tech5@test.example", "support", Some("other")).await;

    let ticket = ticket_service::create(&pool, &report(equipment.id, "No takers"), &support)
        .await
        .unwrap();
    let result = ticket_service::update(
        &pool,
        ticket.id,
        &UpdateTicket {
            assigned_to_user_id: Some(support.id),
            ..Default::default()
        },
        &support,
    )
    .await;
    assert_matches!(result, Err(CoreError::Forbidden(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_secretary_cannot_file_response(pool: PgPool) {
    let equipment = common::create_equipment(&pool, "EQ-RESP-1", None).await;
    let secretary =
        common::register_user(&pool, "sec3@test.example", "department_incharge", None).await;

    let ticket = ticket_service::create(&pool, &report(equipment.id, "Paper jam"), &secretary)
        .await
        .unwrap();
    let result =
        ticket_service::add_response(&pool, ticket.id, None, None, None, &secretary).await;
    assert_matches!(result, Err(CoreError::Forbidden(_)));

    let responses = TicketResponseRepo::list_by_ticket(&pool, ticket.id)
        .await
        .unwrap();
    assert!(responses.is_empty());
}

// ---------------------------------------------------------------------------
// Settling notification fan-out
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_resolve_notifies_reporter_and_managers(pool: PgPool) {
    let equipment = common::create_equipment(&pool, "EQ-FAN-1", None).await;
    let reporter =
        common::register_user(&pool, "sec4@test.example", "department_incharge", None).await;
    let manager = common::register_user(&pool, "mgr8@test.example", "manager", None).await;
    let other_manager = common::register_user(&pool, "mgr9@test.example", "manager", None).await;

    let ticket = ticket_service::create(&pool, &report(equipment.id, "Fan-out check"), &reporter)
        .await
        .unwrap();
    NotificationRepo::mark_all_read(&pool, manager.id).await.unwrap();
    NotificationRepo::mark_all_read(&pool, other_manager.id).await.unwrap();

    ticket_service::update(
        &pool,
        ticket.id,
        &UpdateTicket {
            status: Some("resolved".to_string()),
            ..Default::default()
        },
        &manager,
    )
    .await
    .unwrap();

    // The reporter hears about the change with full wording.
    let reporter_notes = NotificationRepo::list_for_user(&pool, reporter.id, true, 10, 0)
        .await
        .unwrap();
    assert!(reporter_notes
        .iter()
        .any(|n| n.notification_type == "ticket_status_changed"
            && n.message.contains("from Open to Resolved")));

    // The other manager is informed; the resolving manager is not.
    assert_eq!(
        NotificationRepo::unread_count(&pool, other_manager.id).await.unwrap(),
        1
    );
    assert_eq!(NotificationRepo::unread_count(&pool, manager.id).await.unwrap(), 0);
}
