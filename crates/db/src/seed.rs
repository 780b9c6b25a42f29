//! Demo dataset seeder.
//!
//! Populates the store with a realistic hospital inventory: departments,
//! locations, suppliers, one user per role, equipment, service logs,
//! maintenance schedules, and a worked ticket that has been resolved through
//! the full lifecycle (so responses, history, and notifications are present).
//!
//! The seeder refuses to run against an unmigrated database, and refuses a
//! non-empty one unless `force` is set, in which case existing data is
//! cleared first.

use chrono::{Duration, Utc};
use medtrack_core::error::CoreError;
use medtrack_core::roles::{
    ROLE_DEPARTMENT_HEAD, ROLE_DEPARTMENT_INCHARGE, ROLE_MANAGER, ROLE_SUPER_ADMIN, ROLE_SUPPORT,
    SUPPORT_BIOMED_TECH,
};
use medtrack_core::status::{CRITICALITY_CRITICAL, CRITICALITY_HIGH, LOG_PREVENTIVE_MAINTENANCE};
use sqlx::PgPool;

use crate::error::{classify, DbResult};
use crate::models::department::CreateDepartment;
use crate::models::equipment::CreateEquipment;
use crate::models::equipment_log::CreateEquipmentLog;
use crate::models::location::CreateLocation;
use crate::models::maintenance_schedule::CreateMaintenanceSchedule;
use crate::models::supplier::CreateSupplier;
use crate::models::ticket::{ReportTicket, UpdateTicket};
use crate::models::user::{RegisterUser, User};
use crate::repositories::{DepartmentRepo, LocationRepo, SupplierRepo};
use crate::services::{equipment_service, maintenance_service, ticket_service, user_service};

/// What the seeder created.
#[derive(Debug, Default, serde::Serialize)]
pub struct SeedSummary {
    pub departments: usize,
    pub locations: usize,
    pub suppliers: usize,
    pub users: usize,
    pub equipment: usize,
    pub schedules: usize,
    pub tickets: usize,
}

/// Seed the demo dataset.
pub async fn run(pool: &PgPool, force: bool) -> DbResult<SeedSummary> {
    ensure_migrated(pool).await?;

    if is_seeded(pool).await? {
        if !force {
            return Err(CoreError::Conflict(
                "database already contains data; pass force to clear and reseed".to_string(),
            ));
        }
        clear(pool).await?;
    }

    let mut summary = SeedSummary::default();

    // Departments -----------------------------------------------------------
    let departments = [
        ("Emergency Department", "ED", "Emergency and trauma care"),
        ("Intensive Care Unit", "ICU", "Critical care unit"),
        ("Radiology", "RAD", "Medical imaging"),
        ("Laboratory", "LAB", "Clinical laboratory"),
    ];
    let mut dept_ids = Vec::new();
    for (name, code, description) in departments {
        let dept = DepartmentRepo::create(
            pool,
            &CreateDepartment {
                name: name.to_string(),
                code: Some(code.to_string()),
                description: Some(description.to_string()),
            },
        )
        .await
        .map_err(classify)?;
        dept_ids.push(dept.id);
        summary.departments += 1;
    }

    // Locations -------------------------------------------------------------
    let locations = [
        ("ER Bay 1", "ER-1", "Main Building", "1", "101", 0),
        ("ICU Ward A", "ICU-A", "Main Building", "3", "301", 1),
        ("Imaging Suite", "IMG-1", "West Wing", "2", "210", 2),
        ("Central Lab", "LAB-1", "West Wing", "1", "120", 3),
    ];
    for (name, code, building, floor, room, dept_idx) in locations {
        LocationRepo::create(
            pool,
            &CreateLocation {
                name: name.to_string(),
                code: Some(code.to_string()),
                building: Some(building.to_string()),
                floor: Some(floor.to_string()),
                room: Some(room.to_string()),
                department_id: Some(dept_ids[dept_idx]),
            },
        )
        .await
        .map_err(classify)?;
        summary.locations += 1;
    }

    // Suppliers -------------------------------------------------------------
    let suppliers = [
        ("Meditech Supply Co.", "MTS", "sales@meditechsupply.example"),
        ("Hospitec Instruments", "HTI", "contact@hospitec.example"),
    ];
    let mut supplier_ids = Vec::new();
    for (name, code, email) in suppliers {
        let supplier = SupplierRepo::create(
            pool,
            &CreateSupplier {
                name: name.to_string(),
                code: Some(code.to_string()),
                contact_person: None,
                email: Some(email.to_string()),
                phone: None,
                address: None,
                website: None,
                notes: None,
            },
        )
        .await
        .map_err(classify)?;
        supplier_ids.push(supplier.id);
        summary.suppliers += 1;
    }

    // Users: one per role ---------------------------------------------------
    let users = [
        ("admin@medtrack.example", "Super Admin", ROLE_SUPER_ADMIN, None, None),
        ("manager@medtrack.example", "Grace Okafor", ROLE_MANAGER, None, None),
        (
            "edhead@medtrack.example",
            "Liam Navarro",
            ROLE_DEPARTMENT_HEAD,
            None,
            Some(0),
        ),
        (
            "biomed@medtrack.example",
            "Sarah Lindqvist",
            ROLE_SUPPORT,
            Some(SUPPORT_BIOMED_TECH),
            Some(1),
        ),
        (
            "edsecretary@medtrack.example",
            "Noor Haddad",
            ROLE_DEPARTMENT_INCHARGE,
            None,
            Some(0),
        ),
    ];
    let mut seeded_users: Vec<User> = Vec::new();
    for (email, full_name, role, support_type, dept_idx) in users {
        let user = user_service::create(
            pool,
            &RegisterUser {
                email: email.to_string(),
                full_name: full_name.to_string(),
                role: role.to_string(),
                support_type: support_type.map(|s: &str| s.to_string()),
                password: "changeme-demo".to_string(),
                department_id: dept_idx.map(|i: usize| dept_ids[i]),
            },
        )
        .await?;
        seeded_users.push(user);
        summary.users += 1;
    }
    let admin = &seeded_users[0];
    let manager = &seeded_users[1];
    let biomed = &seeded_users[3];
    let secretary = &seeded_users[4];

    // Equipment -------------------------------------------------------------
    let equipment_rows = [
        ("EQ-0001", "Defibrillator", "Zoll", "R Series", 0, CRITICALITY_CRITICAL),
        ("EQ-0002", "Infusion Pump", "Baxter", "Spectrum IQ", 1, CRITICALITY_HIGH),
        ("EQ-0003", "CT Scanner", "Siemens", "Somatom go.Up", 2, CRITICALITY_CRITICAL),
        ("EQ-0004", "Centrifuge", "Eppendorf", "5910 Ri", 3, CRITICALITY_HIGH),
    ];
    let mut equipment_ids = Vec::new();
    for (asset_tag, device_name, manufacturer, model, dept_idx, criticality) in equipment_rows {
        let equipment = equipment_service::create(
            pool,
            &CreateEquipment {
                asset_tag: asset_tag.to_string(),
                serial_number: Some(format!("SN-{asset_tag}")),
                device_name: device_name.to_string(),
                manufacturer: Some(manufacturer.to_string()),
                model: Some(model.to_string()),
                supplier_id: Some(supplier_ids[dept_idx % supplier_ids.len()]),
                acquisition_date: None,
                acquired_value: None,
                status: None,
                location_id: None,
                department_id: Some(dept_ids[dept_idx]),
                in_service_date: Some(Utc::now() - Duration::days(365)),
                notes: None,
                criticality: Some(criticality.to_string()),
            },
            admin,
        )
        .await?;
        equipment_ids.push(equipment.id);
        summary.equipment += 1;
    }

    // Maintenance schedules -------------------------------------------------
    let schedules = [
        (0, "Preventive Maintenance", 90, 5),
        (2, "Calibration", 180, 30),
    ];
    for (eq_idx, maintenance_type, frequency_days, due_in_days) in schedules {
        maintenance_service::create(
            pool,
            &CreateMaintenanceSchedule {
                equipment_id: equipment_ids[eq_idx],
                maintenance_type: maintenance_type.to_string(),
                frequency_days,
                next_maintenance_date: Utc::now() + Duration::days(due_in_days),
                assigned_to_user_id: Some(biomed.id),
                notes: None,
            },
        )
        .await?;
        summary.schedules += 1;
    }

    // Service log -----------------------------------------------------------
    equipment_service::record_log(
        pool,
        &CreateEquipmentLog {
            equipment_id: equipment_ids[1],
            created_by_user_id: Some(biomed.id),
            log_type: LOG_PREVENTIVE_MAINTENANCE.to_string(),
            title: "Quarterly pump inspection".to_string(),
            description: Some("Flow accuracy within tolerance.".to_string()),
            occurred_at: Some(Utc::now() - Duration::days(14)),
            downtime_minutes: Some(45),
            resolved: Some(true),
        },
    )
    .await?;

    // A worked ticket: reported by the secretary, resolved by support -------
    let ticket = ticket_service::create(
        pool,
        &ReportTicket {
            equipment_id: equipment_ids[0],
            title: "Defibrillator fails self-test".to_string(),
            description: Some("Unit reports battery fault on power-up.".to_string()),
            priority: Some("urgent".to_string()),
        },
        secretary,
    )
    .await?;
    summary.tickets += 1;

    ticket_service::update(
        pool,
        ticket.id,
        &UpdateTicket {
            status: Some("in_progress".to_string()),
            assigned_to_user_id: Some(biomed.id),
            ..Default::default()
        },
        manager,
    )
    .await?;

    ticket_service::add_response(
        pool,
        ticket.id,
        Some("Battery pack past end of life.".to_string()),
        Some("Replaced battery pack and re-ran self-test.".to_string()),
        Some("1x Zoll battery pack".to_string()),
        biomed,
    )
    .await?;

    ticket_service::update(
        pool,
        ticket.id,
        &UpdateTicket {
            status: Some("resolved".to_string()),
            ..Default::default()
        },
        biomed,
    )
    .await?;

    tracing::info!(?summary, "seed complete");
    Ok(summary)
}

/// Refuse to seed a database whose schema is not at the latest version.
async fn ensure_migrated(pool: &PgPool) -> DbResult<()> {
    let up_to_date = crate::schema::is_up_to_date(pool).await.map_err(classify)?;
    if !up_to_date {
        return Err(CoreError::Validation(
            "database schema is not at the latest migration; run migrations first".to_string(),
        ));
    }
    Ok(())
}

/// Whether any user rows exist. Users are always seeded, so their presence is
/// the marker for a populated store.
async fn is_seeded(pool: &PgPool) -> DbResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .map_err(classify)?;
    Ok(count > 0)
}

/// Delete all rows, children before parents.
async fn clear(pool: &PgPool) -> DbResult<()> {
    for table in [
        "notifications",
        "ticket_responses",
        "equipment_history",
        "equipment_logs",
        "maintenance_schedules",
        "tickets",
        "equipment",
        "locations",
        "suppliers",
        "departments",
        "users",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(pool)
            .await
            .map_err(classify)?;
    }
    tracing::info!("cleared existing data before reseed");
    Ok(())
}
