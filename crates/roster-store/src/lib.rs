//! Roster Store - SQLite persistence for the student roster
//!
//! Provides:
//! - Connection management for file-backed and transient stores
//! - Embedded migrations that materialize the `students` schema
//! - A repository for bulk inserts, lookups and deletes
//! - `StudentQuery`, the filter/order/limit query surface over `students`
//! - Schema inspection for reporting what was materialized

pub mod db;
pub mod errors;
pub mod inspect;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use db::StoreTarget;
pub use errors::Result;
pub use repo::{StudentQuery, StudentRepo};
