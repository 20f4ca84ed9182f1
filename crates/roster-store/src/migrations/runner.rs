//! Migration runner
//!
//! Applies migrations with checksums, drift detection, and idempotency

#![allow(clippy::result_large_err)]

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::{get_migrations, Migration};
use roster_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::{Connection, OptionalExtension};

/// Apply all pending migrations to the database
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    log_op_start!("apply_migrations");
    let start = std::time::Instant::now();

    let result = apply_all(conn, &get_migrations());

    match result {
        Ok(applied) => {
            log_op_end!(
                "apply_migrations",
                duration_ms = start.elapsed().as_millis() as u64,
                applied = applied
            );
            Ok(())
        }
        Err(e) => {
            log_op_error!(
                "apply_migrations",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(e)
        }
    }
}

/// List applied migration ids in application order
pub fn applied_migrations(conn: &Connection) -> Result<Vec<String>> {
    create_schema_version_table(conn)?;

    let mut stmt = conn
        .prepare("SELECT migration_id FROM schema_version ORDER BY id")
        .map_err(from_rusqlite)?;
    let ids = stmt
        .query_map([], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(from_rusqlite)?;

    Ok(ids)
}

/// Returns the number of migrations newly applied
fn apply_all(conn: &mut Connection, migrations: &[Migration]) -> Result<u64> {
    create_schema_version_table(conn)?;

    let mut applied = 0;
    for migration in migrations {
        if apply_migration(conn, migration.id, migration.sql)? {
            applied += 1;
        }
    }

    Ok(applied)
}

/// Create the schema_version table if it doesn't exist
fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT NOT NULL
        )",
        [],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

/// Apply a single migration if not already applied
///
/// Returns `false` when the migration was already present with a matching checksum.
fn apply_migration(conn: &mut Connection, migration_id: &str, sql: &str) -> Result<bool> {
    let checksum = compute_checksum(sql);

    let recorded: Option<String> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?",
            [migration_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    if let Some(recorded) = recorded {
        if recorded != checksum {
            return Err(checksum_mismatch(migration_id, &recorded, &checksum));
        }
        return Ok(false);
    }

    let tx = conn.transaction().map_err(from_rusqlite)?;

    tx.execute_batch(sql)
        .map_err(|e| migration_error(migration_id, e))?;

    let now = chrono::Utc::now().timestamp();
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?, ?, ?)",
        rusqlite::params![migration_id, now, checksum],
    )
    .map_err(from_rusqlite)?;

    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(migration_id, "migration applied");

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_all_counts_new_migrations() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(apply_all(&mut conn, &get_migrations()).unwrap(), 1);
        assert_eq!(apply_all(&mut conn, &get_migrations()).unwrap(), 0);
    }

    #[test]
    fn test_broken_migration_rolls_back() {
        let mut conn = Connection::open_in_memory().unwrap();
        let broken = [Migration {
            id: "999_broken",
            sql: "CREATE TABLE half (id INTEGER); CREATE TABL oops;",
        }];

        let err = apply_all(&mut conn, &broken).unwrap_err();
        assert_eq!(err.code(), "ERR_PERSISTENCE");
        assert_eq!(err.entity_id(), Some("999_broken"));
        let cause = err.source_error().expect("sqlite failure kept as source");
        assert_eq!(cause.op(), Some("sqlite"));
        assert!(cause.message().contains("syntax error"), "{}", cause);
        assert!(err.to_string().contains("caused by [ERR_PERSISTENCE]"));

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'half'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 0, "failed migration must not leave partial schema");
        assert!(applied_migrations(&conn).unwrap().is_empty());
    }
}
