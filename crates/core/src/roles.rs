//! User role and support specialization constants, enums, and permission
//! predicates.
//!
//! Role hierarchy:
//! - `super_admin`: full system access
//! - `manager`: handles multiple departments
//! - `department_head`: manages a single department
//! - `support`: technical staff (biomed tech, maintenance trades, IT, house keeping)
//! - `department_incharge`: department secretary, limited access

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Role constants
// ---------------------------------------------------------------------------

pub const ROLE_SUPER_ADMIN: &str = "super_admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_DEPARTMENT_HEAD: &str = "department_head";
pub const ROLE_SUPPORT: &str = "support";
pub const ROLE_DEPARTMENT_INCHARGE: &str = "department_incharge";

/// All valid user roles.
pub const VALID_ROLES: &[&str] = &[
    ROLE_SUPER_ADMIN,
    ROLE_MANAGER,
    ROLE_DEPARTMENT_HEAD,
    ROLE_SUPPORT,
    ROLE_DEPARTMENT_INCHARGE,
];

// ---------------------------------------------------------------------------
// Support specialization constants
// ---------------------------------------------------------------------------

pub const SUPPORT_BIOMED_TECH: &str = "biomed_tech";
pub const SUPPORT_MAINTENANCE_AIRCON: &str = "maintenance_aircon";
pub const SUPPORT_MAINTENANCE_PLUMBER: &str = "maintenance_plumber";
pub const SUPPORT_MAINTENANCE_CARPENTER: &str = "maintenance_carpenter";
pub const SUPPORT_MAINTENANCE_PAINTER: &str = "maintenance_painter";
pub const SUPPORT_MAINTENANCE_ELECTRICIAN: &str = "maintenance_electrician";
pub const SUPPORT_IT_STAFF: &str = "it_staff";
pub const SUPPORT_HOUSE_KEEPING: &str = "house_keeping";
pub const SUPPORT_OTHER: &str = "other";

/// All valid support specializations.
pub const VALID_SUPPORT_TYPES: &[&str] = &[
    SUPPORT_BIOMED_TECH,
    SUPPORT_MAINTENANCE_AIRCON,
    SUPPORT_MAINTENANCE_PLUMBER,
    SUPPORT_MAINTENANCE_CARPENTER,
    SUPPORT_MAINTENANCE_PAINTER,
    SUPPORT_MAINTENANCE_ELECTRICIAN,
    SUPPORT_IT_STAFF,
    SUPPORT_HOUSE_KEEPING,
    SUPPORT_OTHER,
];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// User role enum with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    SuperAdmin,
    Manager,
    DepartmentHead,
    Support,
    DepartmentIncharge,
}

impl UserRole {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => ROLE_SUPER_ADMIN,
            Self::Manager => ROLE_MANAGER,
            Self::DepartmentHead => ROLE_DEPARTMENT_HEAD,
            Self::Support => ROLE_SUPPORT,
            Self::DepartmentIncharge => ROLE_DEPARTMENT_INCHARGE,
        }
    }

    /// Parse from a string, returning an error for unknown roles.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            ROLE_SUPER_ADMIN => Ok(Self::SuperAdmin),
            ROLE_MANAGER => Ok(Self::Manager),
            ROLE_DEPARTMENT_HEAD => Ok(Self::DepartmentHead),
            ROLE_SUPPORT => Ok(Self::Support),
            ROLE_DEPARTMENT_INCHARGE => Ok(Self::DepartmentIncharge),
            other => Err(CoreError::Validation(format!(
                "Unknown role: '{other}'. Valid roles: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

/// Support specialization enum with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportType {
    BiomedTech,
    MaintenanceAircon,
    MaintenancePlumber,
    MaintenanceCarpenter,
    MaintenancePainter,
    MaintenanceElectrician,
    ItStaff,
    HouseKeeping,
    Other,
}

impl SupportType {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BiomedTech => SUPPORT_BIOMED_TECH,
            Self::MaintenanceAircon => SUPPORT_MAINTENANCE_AIRCON,
            Self::MaintenancePlumber => SUPPORT_MAINTENANCE_PLUMBER,
            Self::MaintenanceCarpenter => SUPPORT_MAINTENANCE_CARPENTER,
            Self::MaintenancePainter => SUPPORT_MAINTENANCE_PAINTER,
            Self::MaintenanceElectrician => SUPPORT_MAINTENANCE_ELECTRICIAN,
            Self::ItStaff => SUPPORT_IT_STAFF,
            Self::HouseKeeping => SUPPORT_HOUSE_KEEPING,
            Self::Other => SUPPORT_OTHER,
        }
    }

    /// Parse from a string, returning an error for unknown specializations.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            SUPPORT_BIOMED_TECH => Ok(Self::BiomedTech),
            SUPPORT_MAINTENANCE_AIRCON => Ok(Self::MaintenanceAircon),
            SUPPORT_MAINTENANCE_PLUMBER => Ok(Self::MaintenancePlumber),
            SUPPORT_MAINTENANCE_CARPENTER => Ok(Self::MaintenanceCarpenter),
            SUPPORT_MAINTENANCE_PAINTER => Ok(Self::MaintenancePainter),
            SUPPORT_MAINTENANCE_ELECTRICIAN => Ok(Self::MaintenanceElectrician),
            SUPPORT_IT_STAFF => Ok(Self::ItStaff),
            SUPPORT_HOUSE_KEEPING => Ok(Self::HouseKeeping),
            SUPPORT_OTHER => Ok(Self::Other),
            other => Err(CoreError::Validation(format!(
                "Unknown support type: '{other}'. Valid support types: {}",
                VALID_SUPPORT_TYPES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Invariants
// ---------------------------------------------------------------------------

/// A support specialization is only meaningful on the `support` role.
///
/// Returns the parsed specialization when present and permitted.
pub fn validate_support_type(
    role: UserRole,
    support_type: Option<&str>,
) -> Result<Option<SupportType>, CoreError> {
    match support_type {
        None => Ok(None),
        Some(raw) => {
            if role != UserRole::Support {
                return Err(CoreError::Validation(format!(
                    "Support type is only allowed for the '{ROLE_SUPPORT}' role, got role '{}'",
                    role.as_str()
                )));
            }
            SupportType::from_str(raw).map(Some)
        }
    }
}

// ---------------------------------------------------------------------------
// Permission predicates
// ---------------------------------------------------------------------------

/// Manager or super admin.
pub fn is_manager_or_above(role: UserRole) -> bool {
    matches!(role, UserRole::SuperAdmin | UserRole::Manager)
}

/// Department head, manager, or super admin.
pub fn is_department_head_or_above(role: UserRole) -> bool {
    matches!(
        role,
        UserRole::SuperAdmin | UserRole::Manager | UserRole::DepartmentHead
    )
}

/// Everyone except the department secretary.
pub fn is_support_or_above(role: UserRole) -> bool {
    role != UserRole::DepartmentIncharge
}

/// Resolving or closing tickets is denied to the department secretary.
pub fn can_resolve_or_close_ticket(role: UserRole) -> bool {
    role != UserRole::DepartmentIncharge
}

/// Closing tickets is reserved for managers and the super admin.
pub fn can_close_ticket(role: UserRole) -> bool {
    is_manager_or_above(role)
}

pub fn can_assign_tickets(role: UserRole) -> bool {
    is_manager_or_above(role)
}

pub fn can_view_all_tickets(role: UserRole) -> bool {
    is_manager_or_above(role)
}

pub fn can_create_equipment(role: UserRole) -> bool {
    is_department_head_or_above(role)
}

pub fn can_update_equipment_status(role: UserRole) -> bool {
    is_department_head_or_above(role)
}

/// Equipment disposal is reserved for the super admin.
pub fn can_delete_equipment(role: UserRole) -> bool {
    role == UserRole::SuperAdmin
}

pub fn can_manage_users(role: UserRole) -> bool {
    role == UserRole::SuperAdmin
}

pub fn can_manage_departments(role: UserRole) -> bool {
    role == UserRole::SuperAdmin
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- UserRole -------------------------------------------------------------

    #[test]
    fn role_as_str() {
        assert_eq!(UserRole::SuperAdmin.as_str(), "super_admin");
        assert_eq!(UserRole::Manager.as_str(), "manager");
        assert_eq!(UserRole::DepartmentHead.as_str(), "department_head");
        assert_eq!(UserRole::Support.as_str(), "support");
        assert_eq!(UserRole::DepartmentIncharge.as_str(), "department_incharge");
    }

    #[test]
    fn role_round_trip() {
        for raw in VALID_ROLES {
            assert_eq!(UserRole::from_str(raw).unwrap().as_str(), *raw);
        }
    }

    #[test]
    fn role_from_str_invalid() {
        assert!(UserRole::from_str("admin").is_err());
        assert!(UserRole::from_str("").is_err());
    }

    // -- SupportType ----------------------------------------------------------

    #[test]
    fn support_type_round_trip() {
        for raw in VALID_SUPPORT_TYPES {
            assert_eq!(SupportType::from_str(raw).unwrap().as_str(), *raw);
        }
    }

    #[test]
    fn support_type_from_str_invalid() {
        assert!(SupportType::from_str("plumber").is_err());
        assert!(SupportType::from_str("").is_err());
    }

    // -- validate_support_type ------------------------------------------------

    #[test]
    fn support_type_allowed_for_support_role() {
        let parsed = validate_support_type(UserRole::Support, Some("biomed_tech")).unwrap();
        assert_eq!(parsed, Some(SupportType::BiomedTech));
    }

    #[test]
    fn support_type_rejected_for_other_roles() {
        for role in [
            UserRole::SuperAdmin,
            UserRole::Manager,
            UserRole::DepartmentHead,
            UserRole::DepartmentIncharge,
        ] {
            assert!(validate_support_type(role, Some("biomed_tech")).is_err());
        }
    }

    #[test]
    fn absent_support_type_always_valid() {
        for raw in VALID_ROLES {
            let role = UserRole::from_str(raw).unwrap();
            assert_eq!(validate_support_type(role, None).unwrap(), None);
        }
    }

    #[test]
    fn unknown_support_type_rejected_even_for_support() {
        assert!(validate_support_type(UserRole::Support, Some("wizard")).is_err());
    }

    // -- Permission predicates ------------------------------------------------

    #[test]
    fn close_ticket_is_manager_and_above() {
        assert!(can_close_ticket(UserRole::SuperAdmin));
        assert!(can_close_ticket(UserRole::Manager));
        assert!(!can_close_ticket(UserRole::DepartmentHead));
        assert!(!can_close_ticket(UserRole::Support));
        assert!(!can_close_ticket(UserRole::DepartmentIncharge));
    }

    #[test]
    fn resolve_denied_only_to_incharge() {
        assert!(can_resolve_or_close_ticket(UserRole::Support));
        assert!(can_resolve_or_close_ticket(UserRole::DepartmentHead));
        assert!(!can_resolve_or_close_ticket(UserRole::DepartmentIncharge));
    }

    #[test]
    fn equipment_status_is_department_head_and_above() {
        assert!(can_update_equipment_status(UserRole::DepartmentHead));
        assert!(can_update_equipment_status(UserRole::Manager));
        assert!(!can_update_equipment_status(UserRole::Support));
    }

    #[test]
    fn destructive_admin_actions_are_super_admin_only() {
        assert!(can_delete_equipment(UserRole::SuperAdmin));
        assert!(!can_delete_equipment(UserRole::Manager));
        assert!(can_manage_users(UserRole::SuperAdmin));
        assert!(!can_manage_users(UserRole::Manager));
        assert!(can_manage_departments(UserRole::SuperAdmin));
        assert!(!can_manage_departments(UserRole::DepartmentHead));
    }
}
