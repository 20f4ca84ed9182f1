//! Error handling for roster-store
//!
//! Wraps roster-core ExError with store-specific helpers

use roster_core::errors::{ExError, ExErrorKind, RosterError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error that keeps the SQLite failure as its source
pub fn migration_error(migration_id: &str, err: rusqlite::Error) -> ExError {
    let cause = from_rusqlite(err);
    let failed: ExError = RosterError::MigrationFailed {
        migration_id: migration_id.to_string(),
        reason: cause.message().to_string(),
    }
    .into();
    failed.with_source(cause)
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    RosterError::ChecksumMismatch {
        migration_id: migration_id.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
    .into()
}

/// Create a store target parse error
pub fn invalid_target(target: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("parse_store_target")
        .with_entity_id(target.to_string())
        .with_message(reason.to_string())
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
