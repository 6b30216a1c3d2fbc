use briefdesk_core::AppError;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

fn has_code(error: &sqlx::Error, code: &str) -> bool {
    matches!(
        error,
        sqlx::Error::Database(database_error) if database_error.code().as_deref() == Some(code)
    )
}

/// Maps a unique violation to a conflict and everything else to an internal error.
pub(crate) fn unique_conflict_or_internal(
    error: sqlx::Error,
    operation: &str,
    conflict_message: &str,
) -> AppError {
    if has_code(&error, UNIQUE_VIOLATION) {
        return AppError::Conflict(conflict_message.to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}

/// Maps a foreign key violation to a conflict and everything else to an internal error.
pub(crate) fn reference_conflict_or_internal(
    error: sqlx::Error,
    operation: &str,
    conflict_message: &str,
) -> AppError {
    if has_code(&error, FOREIGN_KEY_VIOLATION) {
        return AppError::Conflict(conflict_message.to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
