//! Roster Core - record model and shared facilities
//!
//! This crate provides the pieces shared by the store and the CLI:
//! - The `Student` record and its insertable counterpart `NewStudent`
//! - Column and ordering vocabulary for the `students` table
//! - The structured error facility (`ExError`, `ExErrorKind`, `RosterError`)
//! - The structured logging facility and its canonical field names

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod schema;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, RosterError};
pub use model::{NewStudent, SortDirection, Student, StudentColumn};
