//! Row mapping between `students` rows and model types

use roster_core::model::{Student, StudentColumn};
use rusqlite::Row;

/// Column list matching [`student_from_row`]
pub fn student_projection() -> String {
    StudentColumn::ALL
        .iter()
        .map(|c| c.as_sql())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Map a row selected with [`student_projection`] into a `Student`
pub fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        grade: row.get(3)?,
        birthday: row.get(4)?,
        enrolled_date: row.get(5)?,
    })
}
