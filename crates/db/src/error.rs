//! Classification of sqlx errors into domain errors.
//!
//! Unique indexes are named `uq_*` so conflicts can be reported by name.

use ghz_core::error::CoreError;

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

fn has_code(err: &sqlx::Error, code: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(code),
        _ => false,
    }
}

fn constraint(err: &sqlx::Error) -> &str {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint().unwrap_or("unknown"),
        _ => "unknown",
    }
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    has_code(err, UNIQUE_VIOLATION)
}

pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    has_code(err, FOREIGN_KEY_VIOLATION)
}

/// Whether an insert guarded on a live parent row found no such parent.
///
/// Lookups use `fetch_optional`, so `RowNotFound` only comes from inserts of
/// the form `INSERT ... SELECT ... WHERE EXISTS (parent)`.
pub fn is_missing_parent(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::RowNotFound) || is_foreign_key_violation(err)
}

/// Map a repository error to a [`CoreError`].
///
/// - Unique violations become `Conflict`.
/// - Foreign key violations and guarded inserts without a live parent become
///   `Validation`.
/// - Everything else becomes `Internal`.
pub fn into_core_error(err: sqlx::Error) -> CoreError {
    if is_unique_violation(&err) {
        return CoreError::Conflict(format!(
            "Duplicate value violates unique constraint: {}",
            constraint(&err)
        ));
    }
    if is_missing_parent(&err) {
        return CoreError::Validation(format!(
            "Referenced record does not exist: {}",
            constraint(&err)
        ));
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal(err.to_string())
}
