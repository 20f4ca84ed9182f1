//! Read back the materialized schema of a table

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use roster_core::errors::{ExError, ExErrorKind};
use rusqlite::Connection;

/// One column as declared in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub declared_type: String,
    pub not_null: bool,
    pub default: Option<String>,
    pub primary_key: bool,
}

/// One index over a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexInfo {
    pub name: String,
    pub unique: bool,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub indexes: Vec<IndexInfo>,
}

/// Describe a table's columns (declaration order) and indexes (by name)
///
/// # Errors
///
/// Returns `NotFound` if the table does not exist.
pub fn table_info(conn: &Connection, table: &str) -> Result<TableInfo> {
    let mut stmt = conn
        .prepare(
            "SELECT name, type, \"notnull\", dflt_value, pk
             FROM pragma_table_info(?) ORDER BY cid",
        )
        .map_err(from_rusqlite)?;
    let columns = stmt
        .query_map([table], |row| {
            Ok(ColumnInfo {
                name: row.get(0)?,
                declared_type: row.get(1)?,
                not_null: row.get::<_, i64>(2)? != 0,
                default: row.get(3)?,
                primary_key: row.get::<_, i64>(4)? != 0,
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    if columns.is_empty() {
        return Err(ExError::new(ExErrorKind::NotFound)
            .with_op("table_info")
            .with_entity_id(table)
            .with_message(format!("Table not found: {}", table)));
    }

    let mut stmt = conn
        .prepare(
            "SELECT name, \"unique\" FROM pragma_index_list(?)
             WHERE origin = 'c' ORDER BY name",
        )
        .map_err(from_rusqlite)?;
    let index_heads: Vec<(String, bool)> = stmt
        .query_map([table], |row| {
            Ok((row.get(0)?, row.get::<_, i64>(1)? != 0))
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    let mut indexes = Vec::with_capacity(index_heads.len());
    for (name, unique) in index_heads {
        let mut stmt = conn
            .prepare("SELECT name FROM pragma_index_info(?) ORDER BY seqno")
            .map_err(from_rusqlite)?;
        let columns = stmt
            .query_map([&name], |row| row.get(0))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(from_rusqlite)?;
        indexes.push(IndexInfo {
            name,
            unique,
            columns,
        });
    }

    Ok(TableInfo {
        name: table.to_string(),
        columns,
        indexes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{bootstrap, StoreTarget};

    #[test]
    fn test_students_table_info() {
        let conn = bootstrap(&StoreTarget::Memory).unwrap();
        let info = table_info(&conn, "students").unwrap();

        assert_eq!(info.columns.len(), 6);
        assert!(info.columns[0].primary_key);
        assert_eq!(info.columns[2].declared_type, "VARCHAR(55)");
        assert_eq!(
            info.indexes,
            vec![IndexInfo {
                name: "index_name".to_string(),
                unique: false,
                columns: vec!["name".to_string()],
            }]
        );
    }

    #[test]
    fn test_missing_table_is_not_found() {
        let conn = bootstrap(&StoreTarget::Memory).unwrap();
        let err = table_info(&conn, "courses").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
    }
}
