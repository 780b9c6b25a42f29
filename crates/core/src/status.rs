//! Status and classification enums for equipment, tickets, and service logs,
//! with their permitted value sets and transition tables.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Equipment status
// ---------------------------------------------------------------------------

pub const EQUIPMENT_ACTIVE: &str = "active";
pub const EQUIPMENT_OUT_OF_SERVICE: &str = "out_of_service";
pub const EQUIPMENT_RETIRED: &str = "retired";

/// All valid equipment statuses.
pub const VALID_EQUIPMENT_STATUSES: &[&str] =
    &[EQUIPMENT_ACTIVE, EQUIPMENT_OUT_OF_SERVICE, EQUIPMENT_RETIRED];

/// Equipment status enum with string conversion and transition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentStatus {
    Active,
    OutOfService,
    Retired,
}

impl EquipmentStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => EQUIPMENT_ACTIVE,
            Self::OutOfService => EQUIPMENT_OUT_OF_SERVICE,
            Self::Retired => EQUIPMENT_RETIRED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            EQUIPMENT_ACTIVE => Ok(Self::Active),
            EQUIPMENT_OUT_OF_SERVICE => Ok(Self::OutOfService),
            EQUIPMENT_RETIRED => Ok(Self::Retired),
            other => Err(CoreError::Validation(format!(
                "Unknown equipment status: '{other}'. Valid statuses: {}",
                VALID_EQUIPMENT_STATUSES.join(", ")
            ))),
        }
    }

    /// Whether a transition from `self` to `to` is permitted.
    ///
    /// Active and out-of-service convert freely into each other and either may
    /// be retired; retired is terminal.
    pub fn can_transition_to(&self, to: Self) -> bool {
        match (self, to) {
            (Self::Active, Self::OutOfService) => true,
            (Self::OutOfService, Self::Active) => true,
            (Self::Active | Self::OutOfService, Self::Retired) => true,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Ticket status
// ---------------------------------------------------------------------------

pub const TICKET_OPEN: &str = "open";
pub const TICKET_IN_PROGRESS: &str = "in_progress";
pub const TICKET_RESOLVED: &str = "resolved";
pub const TICKET_CLOSED: &str = "closed";

/// All valid ticket statuses.
pub const VALID_TICKET_STATUSES: &[&str] =
    &[TICKET_OPEN, TICKET_IN_PROGRESS, TICKET_RESOLVED, TICKET_CLOSED];

/// Ticket status enum with string conversion and transition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => TICKET_OPEN,
            Self::InProgress => TICKET_IN_PROGRESS,
            Self::Resolved => TICKET_RESOLVED,
            Self::Closed => TICKET_CLOSED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            TICKET_OPEN => Ok(Self::Open),
            TICKET_IN_PROGRESS => Ok(Self::InProgress),
            TICKET_RESOLVED => Ok(Self::Resolved),
            TICKET_CLOSED => Ok(Self::Closed),
            other => Err(CoreError::Validation(format!(
                "Unknown ticket status: '{other}'. Valid statuses: {}",
                VALID_TICKET_STATUSES.join(", ")
            ))),
        }
    }

    /// Resolved or closed: the work has been completed.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// Whether a transition from `self` to `to` is permitted.
    ///
    /// open -> in_progress | resolved | closed
    /// in_progress -> resolved | closed
    /// resolved -> closed | in_progress (reopen)
    /// closed is terminal.
    pub fn can_transition_to(&self, to: Self) -> bool {
        match (self, to) {
            (Self::Open, Self::InProgress | Self::Resolved | Self::Closed) => true,
            (Self::InProgress, Self::Resolved | Self::Closed) => true,
            (Self::Resolved, Self::Closed | Self::InProgress) => true,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Ticket priority
// ---------------------------------------------------------------------------

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";
pub const PRIORITY_URGENT: &str = "urgent";

/// All valid ticket priorities.
pub const VALID_TICKET_PRIORITIES: &[&str] =
    &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH, PRIORITY_URGENT];

/// Ticket priority enum with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TicketPriority {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => PRIORITY_LOW,
            Self::Medium => PRIORITY_MEDIUM,
            Self::High => PRIORITY_HIGH,
            Self::Urgent => PRIORITY_URGENT,
        }
    }

    /// Parse from a string, returning an error for unknown priorities.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            PRIORITY_LOW => Ok(Self::Low),
            PRIORITY_MEDIUM => Ok(Self::Medium),
            PRIORITY_HIGH => Ok(Self::High),
            PRIORITY_URGENT => Ok(Self::Urgent),
            other => Err(CoreError::Validation(format!(
                "Unknown ticket priority: '{other}'. Valid priorities: {}",
                VALID_TICKET_PRIORITIES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Equipment criticality
// ---------------------------------------------------------------------------

pub const CRITICALITY_LOW: &str = "low";
pub const CRITICALITY_MEDIUM: &str = "medium";
pub const CRITICALITY_HIGH: &str = "high";
pub const CRITICALITY_CRITICAL: &str = "critical";

/// All valid equipment criticality levels.
pub const VALID_CRITICALITIES: &[&str] = &[
    CRITICALITY_LOW,
    CRITICALITY_MEDIUM,
    CRITICALITY_HIGH,
    CRITICALITY_CRITICAL,
];

/// Equipment criticality enum with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    Low,
    Medium,
    High,
    Critical,
}

impl Criticality {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => CRITICALITY_LOW,
            Self::Medium => CRITICALITY_MEDIUM,
            Self::High => CRITICALITY_HIGH,
            Self::Critical => CRITICALITY_CRITICAL,
        }
    }

    /// Parse from a string, returning an error for unknown levels.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            CRITICALITY_LOW => Ok(Self::Low),
            CRITICALITY_MEDIUM => Ok(Self::Medium),
            CRITICALITY_HIGH => Ok(Self::High),
            CRITICALITY_CRITICAL => Ok(Self::Critical),
            other => Err(CoreError::Validation(format!(
                "Unknown criticality: '{other}'. Valid levels: {}",
                VALID_CRITICALITIES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Equipment log type
// ---------------------------------------------------------------------------

pub const LOG_SERVICE: &str = "service";
pub const LOG_PREVENTIVE_MAINTENANCE: &str = "preventive_maintenance";
pub const LOG_INCIDENT: &str = "incident";
pub const LOG_CALIBRATION: &str = "calibration";
pub const LOG_INSPECTION: &str = "inspection";
pub const LOG_NOTE: &str = "note";

/// All valid equipment log types.
pub const VALID_LOG_TYPES: &[&str] = &[
    LOG_SERVICE,
    LOG_PREVENTIVE_MAINTENANCE,
    LOG_INCIDENT,
    LOG_CALIBRATION,
    LOG_INSPECTION,
    LOG_NOTE,
];

/// Equipment log type enum with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogType {
    Service,
    PreventiveMaintenance,
    Incident,
    Calibration,
    Inspection,
    Note,
}

impl LogType {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Service => LOG_SERVICE,
            Self::PreventiveMaintenance => LOG_PREVENTIVE_MAINTENANCE,
            Self::Incident => LOG_INCIDENT,
            Self::Calibration => LOG_CALIBRATION,
            Self::Inspection => LOG_INSPECTION,
            Self::Note => LOG_NOTE,
        }
    }

    /// Parse from a string, returning an error for unknown log types.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            LOG_SERVICE => Ok(Self::Service),
            LOG_PREVENTIVE_MAINTENANCE => Ok(Self::PreventiveMaintenance),
            LOG_INCIDENT => Ok(Self::Incident),
            LOG_CALIBRATION => Ok(Self::Calibration),
            LOG_INSPECTION => Ok(Self::Inspection),
            LOG_NOTE => Ok(Self::Note),
            other => Err(CoreError::Validation(format!(
                "Unknown log type: '{other}'. Valid log types: {}",
                VALID_LOG_TYPES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- EquipmentStatus ------------------------------------------------------

    #[test]
    fn equipment_status_round_trip() {
        for raw in VALID_EQUIPMENT_STATUSES {
            assert_eq!(EquipmentStatus::from_str(raw).unwrap().as_str(), *raw);
        }
    }

    #[test]
    fn equipment_status_from_str_invalid() {
        assert!(EquipmentStatus::from_str("broken").is_err());
        assert!(EquipmentStatus::from_str("").is_err());
    }

    #[test]
    fn equipment_active_and_out_of_service_interchange() {
        assert!(EquipmentStatus::Active.can_transition_to(EquipmentStatus::OutOfService));
        assert!(EquipmentStatus::OutOfService.can_transition_to(EquipmentStatus::Active));
    }

    #[test]
    fn equipment_retired_is_terminal() {
        assert!(EquipmentStatus::Active.can_transition_to(EquipmentStatus::Retired));
        assert!(EquipmentStatus::OutOfService.can_transition_to(EquipmentStatus::Retired));
        assert!(!EquipmentStatus::Retired.can_transition_to(EquipmentStatus::Active));
        assert!(!EquipmentStatus::Retired.can_transition_to(EquipmentStatus::OutOfService));
    }

    // -- TicketStatus ---------------------------------------------------------

    #[test]
    fn ticket_status_round_trip() {
        for raw in VALID_TICKET_STATUSES {
            assert_eq!(TicketStatus::from_str(raw).unwrap().as_str(), *raw);
        }
    }

    #[test]
    fn ticket_status_from_str_invalid() {
        assert!(TicketStatus::from_str("pending").is_err());
    }

    #[test]
    fn ticket_open_can_progress_or_settle() {
        assert!(TicketStatus::Open.can_transition_to(TicketStatus::InProgress));
        assert!(TicketStatus::Open.can_transition_to(TicketStatus::Resolved));
        assert!(TicketStatus::Open.can_transition_to(TicketStatus::Closed));
    }

    #[test]
    fn ticket_resolved_can_reopen_or_close() {
        assert!(TicketStatus::Resolved.can_transition_to(TicketStatus::Closed));
        assert!(TicketStatus::Resolved.can_transition_to(TicketStatus::InProgress));
        assert!(!TicketStatus::Resolved.can_transition_to(TicketStatus::Open));
    }

    #[test]
    fn ticket_closed_is_terminal() {
        for to in [
            TicketStatus::Open,
            TicketStatus::InProgress,
            TicketStatus::Resolved,
        ] {
            assert!(!TicketStatus::Closed.can_transition_to(to));
        }
    }

    #[test]
    fn ticket_no_backwards_to_open() {
        assert!(!TicketStatus::InProgress.can_transition_to(TicketStatus::Open));
    }

    #[test]
    fn settled_statuses() {
        assert!(TicketStatus::Resolved.is_settled());
        assert!(TicketStatus::Closed.is_settled());
        assert!(!TicketStatus::Open.is_settled());
        assert!(!TicketStatus::InProgress.is_settled());
    }

    // -- TicketPriority / Criticality / LogType -------------------------------

    #[test]
    fn priority_round_trip() {
        for raw in VALID_TICKET_PRIORITIES {
            assert_eq!(TicketPriority::from_str(raw).unwrap().as_str(), *raw);
        }
        assert!(TicketPriority::from_str("critical").is_err());
    }

    #[test]
    fn criticality_round_trip() {
        for raw in VALID_CRITICALITIES {
            assert_eq!(Criticality::from_str(raw).unwrap().as_str(), *raw);
        }
        assert!(Criticality::from_str("urgent").is_err());
    }

    #[test]
    fn log_type_round_trip() {
        for raw in VALID_LOG_TYPES {
            assert_eq!(LogType::from_str(raw).unwrap().as_str(), *raw);
        }
        assert!(LogType::from_str("repair").is_err());
    }
}
