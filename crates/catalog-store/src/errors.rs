//! Error handling for catalog-store
//!
//! Wraps catalog-core ExError with store-specific helpers

use catalog_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// A migration's SQL failed; the SQLite error is kept as the source
pub fn migration_error(migration_id: &str, cause: ExError) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!(
            "Migration {} failed: {}",
            migration_id,
            cause.message()
        ))
        .with_source(cause)
}

/// An already-applied migration no longer matches its embedded SQL
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::ConstraintViolation)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a configuration error
pub fn config_error(reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("load_config")
        .with_message(reason)
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// True when SQLite rejected a write on a PRIMARY KEY, UNIQUE, FOREIGN KEY or CHECK constraint
pub fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Create a database error from rusqlite::Error
///
/// Constraint failures are classified as `ConstraintViolation` so callers
/// can answer with a client error; everything else is `Persistence`.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = if is_constraint_violation(&err) {
        ExErrorKind::ConstraintViolation
    } else {
        ExErrorKind::Persistence
    };
    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}
