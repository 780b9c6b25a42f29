//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod department_repo;
pub mod equipment_history_repo;
pub mod equipment_log_repo;
pub mod equipment_repo;
pub mod location_repo;
pub mod maintenance_schedule_repo;
pub mod notification_repo;
pub mod supplier_repo;
pub mod ticket_repo;
pub mod ticket_response_repo;
pub mod user_repo;

pub use department_repo::DepartmentRepo;
pub use equipment_history_repo::EquipmentHistoryRepo;
pub use equipment_log_repo::EquipmentLogRepo;
pub use equipment_repo::EquipmentRepo;
pub use location_repo::LocationRepo;
pub use maintenance_schedule_repo::MaintenanceScheduleRepo;
pub use notification_repo::NotificationRepo;
pub use supplier_repo::SupplierRepo;
pub use ticket_repo::TicketRepo;
pub use ticket_response_repo::TicketResponseRepo;
pub use user_repo::UserRepo;
