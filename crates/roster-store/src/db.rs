//! Database connection management
//!
//! Opens SQLite connections for a [`StoreTarget`] and bootstraps the schema.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, invalid_target, io_error, Result};
use crate::migrations::apply_migrations;
use roster_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Where the roster lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    /// Transient, process-local store discarded on exit
    Memory,
    /// SQLite database file
    File(PathBuf),
}

impl FromStr for StoreTarget {
    type Err = roster_core::ExError;

    /// Accepts `:memory:`, `sqlite::memory:`, `sqlite:///:memory:`,
    /// `sqlite://<path>` or a bare filesystem path.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid_target(s, "store target cannot be empty"));
        }

        let rest = trimmed
            .strip_prefix("sqlite://")
            .or_else(|| trimmed.strip_prefix("sqlite:"))
            .unwrap_or(trimmed);

        // sqlite:///path keeps the third slash as the root of an absolute path
        match rest {
            "" => Err(invalid_target(s, "missing database path")),
            ":memory:" | "/:memory:" => Ok(StoreTarget::Memory),
            path => Ok(StoreTarget::File(PathBuf::from(path))),
        }
    }
}

impl std::fmt::Display for StoreTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreTarget::Memory => f.write_str("sqlite::memory:"),
            StoreTarget::File(path) => write!(f, "sqlite://{}", path.display()),
        }
    }
}

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Open a connection for the given target, creating parent directories of a file target
pub fn open_target(target: &StoreTarget) -> Result<Connection> {
    match target {
        StoreTarget::Memory => open_in_memory(),
        StoreTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| io_error("create_store_dir", e))?;
            }
            open(path)
        }
    }
}

/// Open and migrate a store so it is ready for queries
pub fn bootstrap(target: &StoreTarget) -> Result<Connection> {
    log_op_start!("store_bootstrap", store = %target);
    let start = std::time::Instant::now();

    let result = open_target(target).and_then(|mut conn| {
        apply_migrations(&mut conn)?;
        Ok(conn)
    });

    match result {
        Ok(conn) => {
            log_op_end!(
                "store_bootstrap",
                duration_ms = start.elapsed().as_millis() as u64
            );
            Ok(conn)
        }
        Err(e) => {
            log_op_error!(
                "store_bootstrap",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(e)
        }
    }
}
