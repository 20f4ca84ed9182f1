use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// Declared length bound of the `email` column.
///
/// SQLite does not enforce declared VARCHAR lengths, so neither do we.
pub const EMAIL_MAX_LEN: usize = 55;

/// A persisted row of the `students` table
///
/// Every column except `id` is nullable, so a row read back from a store
/// that other writers touch may carry `None` in any of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    /// Store-assigned primary key
    pub id: i64,

    /// Student name (indexed, non-unique)
    pub name: Option<String>,

    pub email: Option<String>,

    pub grade: Option<i64>,

    pub birthday: Option<NaiveDateTime>,

    /// Set by the store at insert time unless supplied explicitly
    pub enrolled_date: Option<NaiveDateTime>,
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Student {}: {}, Grade {}",
            self.id,
            OrNone(&self.name),
            OrNone(&self.grade)
        )
    }
}

/// Renders a missing column as `None`
pub struct OrNone<'a, T>(pub &'a Option<T>);

impl<T: fmt::Display> fmt::Display for OrNone<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => fmt::Display::fmt(value, f),
            None => f.write_str("None"),
        }
    }
}

/// A student that has been constructed in memory but not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub grade: i64,
    pub birthday: NaiveDateTime,

    /// `None` lets the store stamp the creation time
    pub enrolled_date: Option<NaiveDateTime>,
}

impl NewStudent {
    /// Create a new unsaved student; the enrolled date is left to the store
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        grade: i64,
        birthday: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            grade,
            birthday,
            enrolled_date: None,
        }
    }

    /// Override the store-assigned enrolled date
    pub fn with_enrolled_date(mut self, enrolled_date: NaiveDateTime) -> Self {
        self.enrolled_date = Some(enrolled_date);
        self
    }
}

fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// The two example students used by the walkthrough, in insertion order
pub fn sample_students() -> Vec<NewStudent> {
    vec![
        NewStudent::new(
            "Albert Einstein",
            "albert.einstein@zurich.edu",
            6,
            midnight(1879, 3, 14),
        ),
        NewStudent::new(
            "Alan Turing",
            "alan.turing@sherborne.edu",
            11,
            midnight(1912, 6, 23),
        ),
    ]
}
