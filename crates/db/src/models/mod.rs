//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Enum-valued columns are carried as `String` and validated against the
//! value sets in `medtrack_core` by the service layer before they reach the
//! database, which enforces them again with CHECK constraints.

pub mod department;
pub mod equipment;
pub mod equipment_history;
pub mod equipment_log;
pub mod location;
pub mod maintenance_schedule;
pub mod notification;
pub mod supplier;
pub mod ticket;
pub mod ticket_response;
pub mod user;
