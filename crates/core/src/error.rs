use crate::types::DbId;

/// Domain error taxonomy.
///
/// `NotFound`, `Validation`, and `Conflict` are recoverable by the caller and
/// surfaced through the presentation boundary; `Internal` is logged and shown
/// as a generic failure.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
