use roster_core::errors::{ExError, ExErrorKind, RosterError};

#[test]
fn test_student_not_found_verifiable_by_kind() {
    let ex_err: ExError = RosterError::StudentNotFound { id: 42 }.into();

    assert_eq!(ex_err.kind(), ExErrorKind::NotFound);
    assert_eq!(ex_err.code(), "ERR_NOT_FOUND");
    assert_eq!(ex_err.entity_id(), Some("42"));
    assert!(ex_err.message().contains("Student not found"));
}

#[test]
fn test_checksum_mismatch_is_constraint_violation() {
    let ex_err: ExError = RosterError::ChecksumMismatch {
        migration_id: "001_students".to_string(),
        expected: "aa".to_string(),
        actual: "bb".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::ConstraintViolation);
    assert_eq!(ex_err.op(), Some("migration_checksum"));
    assert_eq!(ex_err.entity_id(), Some("001_students"));
    assert!(ex_err.message().contains("expected aa, got bb"));
}

#[test]
fn test_migration_failed_is_persistence() {
    let ex_err: ExError = RosterError::MigrationFailed {
        migration_id: "001_students".to_string(),
        reason: "near \"TABL\": syntax error".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::Persistence);
    assert_eq!(ex_err.op(), Some("migration"));
}

#[test]
fn test_invalid_query_is_invalid_input() {
    let ex_err: ExError = RosterError::InvalidQuery {
        reason: "limit must be positive".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.code(), "ERR_INVALID_INPUT");
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
        (ExErrorKind::ConstraintViolation, "ERR_CONSTRAINT_VIOLATION"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
        (ExErrorKind::Internal, "ERR_INTERNAL"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}
