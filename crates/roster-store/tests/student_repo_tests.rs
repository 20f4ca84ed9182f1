// Integration tests for row-level repository operations

mod common;

use common::{date, seeded_db, setup_test_db};
use roster_core::model::NewStudent;
use roster_core::ExErrorKind;
use roster_store::{StudentQuery, StudentRepo};

#[test]
fn test_insert_many_assigns_ids_in_order() {
    let mut conn = setup_test_db();

    let ids = StudentRepo::insert_many(
        &mut conn,
        &[
            NewStudent::new("Grace Hopper", "grace@navy.mil", 12, date(1906, 12, 9)),
            NewStudent::new("Ada Lovelace", "ada@analytical.org", 9, date(1815, 12, 10)),
        ],
    )
    .unwrap();

    assert_eq!(ids.len(), 2);
    assert!(ids[0] < ids[1]);

    let grace = StudentRepo::get(&conn, ids[0]).unwrap().unwrap();
    assert_eq!(grace.name.as_deref(), Some("Grace Hopper"));
    assert_eq!(grace.email.as_deref(), Some("grace@navy.mil"));
    assert_eq!(grace.grade, Some(12));
    assert_eq!(grace.birthday, Some(date(1906, 12, 9)));
}

#[test]
fn test_enrolled_date_defaults_to_creation_time() {
    let mut conn = setup_test_db();
    let before = chrono::Utc::now().naive_utc() - chrono::Duration::seconds(5);

    let ids = StudentRepo::insert_many(
        &mut conn,
        &[NewStudent::new(
            "Alan Turing",
            "alan.turing@sherborne.edu",
            11,
            date(1912, 6, 23),
        )],
    )
    .unwrap();

    let after = chrono::Utc::now().naive_utc() + chrono::Duration::seconds(5);
    let student = StudentRepo::get(&conn, ids[0]).unwrap().unwrap();
    let enrolled = student.enrolled_date.expect("enrolled_date stamped by the store");
    assert!(
        enrolled >= before && enrolled <= after,
        "enrolled_date {} should be close to now",
        enrolled
    );
}

#[test]
fn test_explicit_enrolled_date_is_kept() {
    let mut conn = setup_test_db();

    let ids = StudentRepo::insert_many(
        &mut conn,
        &[
            NewStudent::new("Emmy Noether", "emmy@goettingen.de", 10, date(1882, 3, 23))
                .with_enrolled_date(date(1900, 10, 1)),
        ],
    )
    .unwrap();

    let student = StudentRepo::get(&conn, ids[0]).unwrap().unwrap();
    assert_eq!(student.enrolled_date, Some(date(1900, 10, 1)));
}

#[test]
fn test_insert_many_is_all_or_nothing() {
    let mut conn = setup_test_db();
    conn.execute_batch(
        "CREATE TRIGGER reject_mallory BEFORE INSERT ON students
         WHEN NEW.name = 'Mallory'
         BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
    )
    .unwrap();

    let err = StudentRepo::insert_many(
        &mut conn,
        &[
            NewStudent::new("Alice", "alice@example.org", 8, date(2000, 1, 1)),
            NewStudent::new("Mallory", "mallory@example.org", 8, date(2000, 1, 1)),
        ],
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert!(StudentRepo::list_all(&conn).unwrap().is_empty());
}

#[test]
fn test_list_all_returns_every_row_by_id() {
    let conn = seeded_db();

    let students = StudentRepo::list_all(&conn).unwrap();
    let names: Vec<&str> = students.iter().filter_map(|s| s.name.as_deref()).collect();
    assert_eq!(names, vec!["Albert Einstein", "Alan Turing"]);
    assert_eq!(
        students[0].to_string(),
        "Student 1: Albert Einstein, Grade 6"
    );
}

#[test]
fn test_rows_with_null_columns_read_back() {
    let conn = seeded_db();
    conn.execute(
        "INSERT INTO students (name, grade, birthday) VALUES ('Marie Curie', 9, '1867-11-07 00:00:00')",
        [],
    )
    .unwrap();
    conn.execute("INSERT INTO students (email) VALUES ('anon@example.org')", [])
        .unwrap();

    let students = StudentRepo::list_all(&conn).unwrap();
    assert_eq!(students.len(), 4);

    let curie = &students[2];
    assert_eq!(curie.name.as_deref(), Some("Marie Curie"));
    assert_eq!(curie.email, None);
    assert_eq!(curie.birthday, Some(date(1867, 11, 7)));
    assert!(curie.enrolled_date.is_some());

    let anonymous = &students[3];
    assert_eq!(anonymous.to_string(), "Student 4: None, Grade None");
    assert_eq!(anonymous.email.as_deref(), Some("anon@example.org"));

    assert_eq!(StudentQuery::new().all(&conn).unwrap().len(), 4);
    let first = StudentQuery::new()
        .name_eq("Marie Curie")
        .first(&conn)
        .unwrap()
        .expect("Curie present");
    assert_eq!(first.id, curie.id);

    let mut all_names = StudentQuery::new().names(&conn).unwrap();
    all_names.sort();
    assert_eq!(all_names[0], None);

    assert_eq!(StudentQuery::new().increment_grade(&conn).unwrap(), 4);
    let anonymous = StudentRepo::get(&conn, anonymous.id).unwrap().unwrap();
    assert_eq!(anonymous.grade, None);
}

#[test]
fn test_get_missing_is_none() {
    let conn = seeded_db();
    assert!(StudentRepo::get(&conn, 999).unwrap().is_none());
}

#[test]
fn test_delete_missing_is_not_found() {
    let conn = seeded_db();

    let err = StudentRepo::delete(&conn, 999).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.entity_id(), Some("999"));
    assert_eq!(StudentRepo::list_all(&conn).unwrap().len(), 2);
}
