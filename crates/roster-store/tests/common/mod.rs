#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use roster_core::model::sample_students;
use roster_store::StudentRepo;
use rusqlite::Connection;

pub fn setup_test_db() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    roster_store::migrations::apply_migrations(&mut conn).unwrap();
    conn
}

/// A migrated store holding the two example students
pub fn seeded_db() -> Connection {
    let mut conn = setup_test_db();
    StudentRepo::insert_many(&mut conn, &sample_students()).unwrap();
    conn
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Names as the nullable `name` column reads them back
pub fn names(list: &[&str]) -> Vec<Option<String>> {
    list.iter().map(|n| Some(n.to_string())).collect()
}
