//! Lifecycle service layer.
//!
//! Services validate inputs against the domain rules in `medtrack_core`
//! before touching the store, translate database constraint violations into
//! the domain error taxonomy, and fan out notifications as a side effect of
//! state-changing events. Repositories stay mechanical; every invariant that
//! spans fields or rows lives here.

pub mod department_service;
pub mod equipment_service;
pub mod maintenance_service;
pub mod notification_service;
pub mod ticket_service;
pub mod user_service;
