// Store operations emit start/end boundaries through the logging facility

mod common;

use common::seeded_db;
use roster_core::logging_facility::init_test_capture;
use roster_core::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ERR_OP};
use roster_store::{StudentQuery, StudentRepo};

#[test]
fn test_store_operations_are_logged() {
    let capture = init_test_capture();
    let conn = seeded_db();

    StudentQuery::new().count(&conn).unwrap();
    let _ = StudentRepo::delete(&conn, 404);

    capture.assert_event_exists("student_insert_many", EVENT_START);
    capture.assert_event_exists("student_insert_many", EVENT_END);
    capture.assert_event_exists("student_query_count", EVENT_END);
    capture.assert_event_exists("student_delete", EVENT_END_ERROR);

    let errors: Vec<_> = capture
        .events_for_op("student_delete")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert!(errors
        .iter()
        .any(|e| e.fields.get("err_code").map(String::as_str) == Some("ERR_NOT_FOUND")));
}

#[test]
fn test_store_failure_logs_the_sqlite_operation() {
    let capture = init_test_capture();
    let conn = rusqlite::Connection::open_in_memory().unwrap();

    let err = StudentRepo::list_all(&conn).unwrap_err();
    assert_eq!(err.op(), Some("sqlite"));

    let failures: Vec<_> = capture
        .events_for_op("student_list_all")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert!(failures.iter().any(|e| {
        e.fields.get(FIELD_ERR_OP).map(String::as_str) == Some("sqlite")
            && e.fields.get("err_code").map(String::as_str) == Some("ERR_PERSISTENCE")
    }));
}
