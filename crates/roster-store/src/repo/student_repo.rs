//! SQLite repository for student rows

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use crate::repo::instrumented;
use crate::repo::rows::{student_from_row, student_projection};
use roster_core::errors::RosterError;
use roster_core::model::{NewStudent, Student};
use rusqlite::{Connection, OptionalExtension, Transaction};

const INSERT_STUDENT: &str = "INSERT INTO students (name, email, grade, birthday, enrolled_date)
     VALUES (?1, ?2, ?3, ?4, COALESCE(?5, CURRENT_TIMESTAMP))";

/// SQLite repository for students
pub struct StudentRepo;

impl StudentRepo {
    /// Persist a batch of new students in one transaction
    ///
    /// Either every row is written or none is. Returns the store-assigned ids
    /// in input order.
    pub fn insert_many(conn: &mut Connection, students: &[NewStudent]) -> Result<Vec<i64>> {
        instrumented("student_insert_many", || {
            let tx = conn.transaction().map_err(from_rusqlite)?;
            let ids = Self::insert_many_tx(&tx, students)?;
            tx.commit().map_err(from_rusqlite)?;

            tracing::debug!(rows = ids.len(), "students inserted");
            Ok(ids)
        })
    }

    /// Persist a batch of new students within a caller-owned transaction
    pub fn insert_many_tx(tx: &Transaction, students: &[NewStudent]) -> Result<Vec<i64>> {
        let mut stmt = tx.prepare_cached(INSERT_STUDENT).map_err(from_rusqlite)?;

        let mut ids = Vec::with_capacity(students.len());
        for student in students {
            stmt.execute(rusqlite::params![
                student.name,
                student.email,
                student.grade,
                student.birthday,
                student.enrolled_date,
            ])
            .map_err(from_rusqlite)?;
            ids.push(tx.last_insert_rowid());
        }

        Ok(ids)
    }

    /// Get a student by id
    pub fn get(conn: &Connection, id: i64) -> Result<Option<Student>> {
        instrumented("student_get", || {
            let sql = format!(
                "SELECT {} FROM students WHERE id = ?",
                student_projection()
            );
            conn.query_row(&sql, [id], student_from_row)
                .optional()
                .map_err(from_rusqlite)
        })
    }

    /// Every student, ordered by id
    pub fn list_all(conn: &Connection) -> Result<Vec<Student>> {
        instrumented("student_list_all", || {
            let sql = format!("SELECT {} FROM students ORDER BY id", student_projection());
            let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
            let students = stmt
                .query_map([], student_from_row)
                .map_err(from_rusqlite)?
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(from_rusqlite)?;
            Ok(students)
        })
    }

    /// Delete one located student
    ///
    /// # Errors
    ///
    /// Returns `StudentNotFound` if no row has this id.
    pub fn delete(conn: &Connection, id: i64) -> Result<()> {
        instrumented("student_delete", || {
            let removed = conn
                .execute("DELETE FROM students WHERE id = ?", [id])
                .map_err(from_rusqlite)?;

            if removed == 0 {
                return Err(RosterError::StudentNotFound { id }.into());
            }
            Ok(())
        })
    }
}
