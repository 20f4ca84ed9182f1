//! Filtered, ordered and limited queries over `students`
//!
//! A `StudentQuery` is built up with filters, an optional ordering and an
//! optional limit, then run through one of its terminal operations:
//!
//! ```
//! use roster_core::{SortDirection, StudentColumn};
//! use roster_store::{db, StudentQuery, StoreTarget};
//!
//! let conn = db::bootstrap(&StoreTarget::Memory).unwrap();
//! let top = StudentQuery::new()
//!     .order_by(StudentColumn::Grade, SortDirection::Desc)
//!     .first_name_and_birthday(&conn)
//!     .unwrap();
//! assert!(top.is_none());
//! ```

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use crate::repo::instrumented;
use crate::repo::rows::{student_from_row, student_projection};
use chrono::NaiveDateTime;
use roster_core::errors::RosterError;
use roster_core::model::{SortDirection, Student, StudentColumn};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};

/// A `(name, birthday)` projection; either column may be NULL
pub type NameAndBirthday = (Option<String>, Option<NaiveDateTime>);

/// Query over the `students` table
///
/// Filters combine with AND. With no filters, every row matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentQuery {
    name_contains: Option<String>,
    name_eq: Option<String>,
    grade_eq: Option<i64>,
    order: Option<(StudentColumn, SortDirection)>,
    limit: Option<u32>,
}

impl StudentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match names containing `fragment` (SQL `LIKE '%fragment%'`)
    pub fn name_contains(mut self, fragment: impl Into<String>) -> Self {
        self.name_contains = Some(fragment.into());
        self
    }

    pub fn name_eq(mut self, name: impl Into<String>) -> Self {
        self.name_eq = Some(name.into());
        self
    }

    pub fn grade_eq(mut self, grade: i64) -> Self {
        self.grade_eq = Some(grade);
        self
    }

    /// Replace the ordering
    pub fn order_by(mut self, column: StudentColumn, direction: SortDirection) -> Self {
        self.order = Some((column, direction));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Every matching student
    pub fn all(&self, conn: &Connection) -> Result<Vec<Student>> {
        instrumented("student_query_all", || {
            self.fetch(conn, &student_projection(), student_from_row)
        })
    }

    /// The first matching student, if any
    pub fn first(&self, conn: &Connection) -> Result<Option<Student>> {
        instrumented("student_query_first", || {
            let students = self
                .clone()
                .limit(1)
                .fetch(conn, &student_projection(), student_from_row)?;
            Ok(students.into_iter().next())
        })
    }

    /// The `name` column of every matching student
    pub fn names(&self, conn: &Connection) -> Result<Vec<Option<String>>> {
        instrumented("student_query_names", || {
            self.fetch(conn, "name", |row| row.get(0))
        })
    }

    /// The `(name, birthday)` columns of every matching student
    pub fn names_and_birthdays(&self, conn: &Connection) -> Result<Vec<NameAndBirthday>> {
        instrumented("student_query_names_and_birthdays", || {
            self.fetch(conn, "name, birthday", name_and_birthday)
        })
    }

    /// The `(name, birthday)` columns of the first matching student, if any
    pub fn first_name_and_birthday(&self, conn: &Connection) -> Result<Option<NameAndBirthday>> {
        instrumented("student_query_first_name_and_birthday", || {
            let rows = self
                .clone()
                .limit(1)
                .fetch(conn, "name, birthday", name_and_birthday)?;
            Ok(rows.into_iter().next())
        })
    }

    /// Number of matching students; ordering and limit are ignored
    pub fn count(&self, conn: &Connection) -> Result<i64> {
        instrumented("student_query_count", || {
            let (where_sql, params) = self.where_clause();
            let sql = format!("SELECT COUNT(id) FROM students{}", where_sql);
            conn.query_row(&sql, params_from_iter(params), |row| row.get(0))
                .map_err(from_rusqlite)
        })
    }

    /// Add one to the grade of every matching student
    ///
    /// Returns the number of rows updated.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuery` if the query carries a limit.
    pub fn increment_grade(&self, conn: &Connection) -> Result<usize> {
        instrumented("student_increment_grade", || {
            self.ensure_unlimited("increment_grade")?;
            let (where_sql, params) = self.where_clause();
            let sql = format!("UPDATE students SET grade = grade + 1{}", where_sql);
            conn.execute(&sql, params_from_iter(params))
                .map_err(from_rusqlite)
        })
    }

    /// Delete every matching student
    ///
    /// Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuery` if the query carries a limit.
    pub fn delete(&self, conn: &Connection) -> Result<usize> {
        instrumented("student_query_delete", || {
            self.ensure_unlimited("delete")?;
            let (where_sql, params) = self.where_clause();
            let sql = format!("DELETE FROM students{}", where_sql);
            conn.execute(&sql, params_from_iter(params))
                .map_err(from_rusqlite)
        })
    }

    fn ensure_unlimited(&self, operation: &str) -> Result<()> {
        match self.limit {
            Some(limit) => Err(RosterError::InvalidQuery {
                reason: format!("{} cannot be limited (limit {})", operation, limit),
            }
            .into()),
            None => Ok(()),
        }
    }

    fn where_clause(&self) -> (String, Vec<Value>) {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        if let Some(fragment) = &self.name_contains {
            conditions.push("name LIKE '%' || ? || '%'");
            params.push(Value::Text(fragment.clone()));
        }
        if let Some(name) = &self.name_eq {
            conditions.push("name = ?");
            params.push(Value::Text(name.clone()));
        }
        if let Some(grade) = self.grade_eq {
            conditions.push("grade = ?");
            params.push(Value::Integer(grade));
        }

        if conditions.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), params)
        }
    }

    fn select_sql(&self, projection: &str) -> (String, Vec<Value>) {
        let (where_sql, params) = self.where_clause();
        let mut sql = format!("SELECT {} FROM students{}", projection, where_sql);

        if let Some((column, direction)) = self.order {
            sql.push_str(&format!(
                " ORDER BY {} {}",
                column.as_sql(),
                direction.as_sql()
            ));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        (sql, params)
    }

    fn fetch<T, F>(&self, conn: &Connection, projection: &str, map: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let (sql, params) = self.select_sql(projection);
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map(params_from_iter(params), map)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(rows)
    }
}

fn name_and_birthday(row: &Row<'_>) -> rusqlite::Result<NameAndBirthday> {
    Ok((row.get(0)?, row.get(1)?))
}
