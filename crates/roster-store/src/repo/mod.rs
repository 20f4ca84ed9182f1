//! Repository layer for the `students` table
//!
//! `StudentRepo` covers row-level writes and lookups; `StudentQuery`
//! composes filtered, ordered and limited reads plus bulk update/delete.

pub mod query;
pub mod rows;
pub mod student_repo;

pub use query::{NameAndBirthday, StudentQuery};
pub use student_repo::StudentRepo;

use crate::errors::Result;
use roster_core::{log_op_end, log_op_error, log_op_start};

/// Run a store operation between start/end log events
pub(crate) fn instrumented<T>(op: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    log_op_start!(op);
    let start = std::time::Instant::now();

    f().map(|value| {
        log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
        value
    })
    .map_err(|e| {
        log_op_error!(
            op,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })
}
