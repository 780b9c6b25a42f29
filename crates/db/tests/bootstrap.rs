//! Full bootstrap tests: connect, migrate, introspect the schema version,
//! and seed the demo dataset.

use assert_matches::assert_matches;
use medtrack_core::error::CoreError;
use medtrack_db::repositories::{
    EquipmentHistoryRepo, EquipmentRepo, TicketRepo, TicketResponseRepo, UserRepo,
};
use medtrack_db::{schema, seed};
use sqlx::PgPool;

/// Connect, verify health, and confirm every migration is recorded.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    medtrack_db::health_check(&pool).await.unwrap();

    let current = schema::current_version(&pool).await.unwrap();
    assert_eq!(current, schema::latest_embedded_version());

    let history = schema::history(&pool).await.unwrap();
    assert_eq!(history.len(), 11, "one record per embedded migration");
    assert!(history.iter().all(|m| m.success));

    // Versions are recorded in ascending order.
    let versions: Vec<i64> = history.iter().map(|m| m.version).collect();
    let mut sorted = versions.clone();
    sorted.sort_unstable();
    assert_eq!(versions, sorted);

    assert!(schema::pending_versions(&pool).await.unwrap().is_empty());
    assert!(schema::is_up_to_date(&pool).await.unwrap());
}

/// The seeder produces the demo dataset, including a worked ticket.
#[sqlx::test(migrations = "./migrations")]
async fn test_seed_populates_demo_data(pool: PgPool) {
    let summary = seed::run(&pool, false).await.unwrap();
    assert_eq!(summary.departments, 4);
    assert_eq!(summary.users, 5);
    assert_eq!(summary.equipment, 4);
    assert_eq!(summary.tickets, 1);

    // One user per role, with hashed passwords.
    let admin = UserRepo::find_by_email(&pool, "admin@medtrack.example")
        .await
        .unwrap()
        .expect("seeded super admin");
    assert_eq!(admin.role, "super_admin");
    assert!(admin.password_hash.starts_with("$argon2id$"));

    let biomed = UserRepo::find_by_email(&pool, "biomed@medtrack.example")
        .await
        .unwrap()
        .expect("seeded biomed tech");
    assert_eq!(biomed.support_type.as_deref(), Some("biomed_tech"));

    // The worked ticket went through the full lifecycle.
    let tickets = TicketRepo::list(&pool, &Default::default()).await.unwrap();
    assert_eq!(tickets.len(), 1);
    let ticket = &tickets[0];
    assert_eq!(ticket.status, "resolved");
    assert!(ticket.completed_on.is_some());

    let responses = TicketResponseRepo::list_by_ticket(&pool, ticket.id)
        .await
        .unwrap();
    assert_eq!(responses.len(), 1);

    let history = EquipmentHistoryRepo::list_by_ticket_code(&pool, &ticket.ticket_code)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);

    // Settling the ticket bumped the defibrillator's repair counter.
    let defib = EquipmentRepo::find_by_asset_tag(&pool, "EQ-0001")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(defib.repair_count, 1);
}

/// Seeding a populated store is refused unless forced.
#[sqlx::test(migrations = "./migrations")]
async fn test_seed_refuses_populated_store(pool: PgPool) {
    seed::run(&pool, false).await.unwrap();

    let result = seed::run(&pool, false).await;
    assert_matches!(result, Err(CoreError::Conflict(_)));

    // Forcing clears and reseeds rather than duplicating.
    let summary = seed::run(&pool, true).await.unwrap();
    assert_eq!(summary.users, 5);
    let users = UserRepo::list(&pool).await.unwrap();
    assert_eq!(users.len(), 5);
}
