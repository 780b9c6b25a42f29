//! Shared factories for integration tests.

#![allow(dead_code)]

use medtrack_core::types::DbId;
use medtrack_db::models::department::{CreateDepartment, Department};
use medtrack_db::models::equipment::{CreateEquipment, Equipment};
use medtrack_db::models::user::{RegisterUser, User};
use medtrack_db::repositories::{DepartmentRepo, EquipmentRepo};
use medtrack_db::services::user_service;
use sqlx::PgPool;

/// Register a user through the service so the password is hashed and the
/// role/support-type invariant is enforced.
pub async fn register_user(
    pool: &PgPool,
    email: &str,
    role: &str,
    support_type: Option<&str>,
) -> User {
    user_service::create(
        pool,
        &RegisterUser {
            email: email.to_string(),
            full_name: format!("Test {role}"),
            role: role.to_string(),
            support_type: support_type.map(|s| s.to_string()),
            password: "integration-pass".to_string(),
            department_id: None,
        },
    )
    .await
    .expect("user should be created")
}

pub async fn create_department(pool: &PgPool, name: &str) -> Department {
    DepartmentRepo::create(
        pool,
        &CreateDepartment {
            name: name.to_string(),
            code: None,
            description: None,
        },
    )
    .await
    .expect("department should be created")
}

pub fn new_equipment(asset_tag: &str, department_id: Option<DbId>) -> CreateEquipment {
    CreateEquipment {
        asset_tag: asset_tag.to_string(),
        serial_number: Some(format!("SN-{asset_tag}")),
        device_name: "Infusion Pump".to_string(),
        manufacturer: None,
        model: None,
        supplier_id: None,
        acquisition_date: None,
        acquired_value: None,
        status: None,
        location_id: None,
        department_id,
        in_service_date: None,
        notes: None,
        criticality: None,
    }
}

pub async fn create_equipment(
    pool: &PgPool,
    asset_tag: &str,
    department_id: Option<DbId>,
) -> Equipment {
    EquipmentRepo::create(pool, &new_equipment(asset_tag, department_id))
        .await
        .expect("equipment should be created")
}
