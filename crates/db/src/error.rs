//! Classification of database errors into the domain error taxonomy.

use medtrack_core::error::CoreError;

/// Service-layer result carrying a domain error.
pub type DbResult<T> = Result<T, CoreError>;

/// Classify a sqlx error into a [`CoreError`].
///
/// - Unique violations (SQLSTATE 23505) become `Conflict`.
/// - Foreign-key violations (23503) become `Validation`: the caller supplied a
///   reference to a row that does not exist.
/// - Check violations (23514) become `Validation`: a value fell outside its
///   declared set or range.
/// - Everything else is an internal database error.
pub fn classify(err: sqlx::Error) -> CoreError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some("23505") => CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                )),
                Some("23503") => CoreError::Validation(format!(
                    "Reference to a missing row violates foreign key: {constraint}"
                )),
                Some("23514") => CoreError::Validation(format!(
                    "Value violates check constraint: {constraint}"
                )),
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    CoreError::Internal(format!("Database error: {db_err}"))
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            CoreError::Internal(format!("Database error: {other}"))
        }
    }
}

/// Flatten `validator` failures into a single validation message.
pub fn classify_validation(errors: validator::ValidationErrors) -> CoreError {
    CoreError::Validation(errors.to_string())
}
