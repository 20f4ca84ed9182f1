//! Canonical logging macros
//!
//! Every roster store operation is bracketed by these three events:
//! `roster_store::repo::instrumented` wraps the repository and query calls
//! (`student_insert_many`, `student_query_count`, ...), while
//! `apply_migrations` and `store_bootstrap` call the macros directly.
//! An operation emits `start`, then exactly one of `end` or `end_error`.
//!
//! `log_op_error!` accepts anything convertible into `ExError`, so a
//! `RosterError` can be logged before it is propagated. Besides the error
//! kind and code it records `err_op`, the operation the error itself names
//! (for example `sqlite` under `student_list_all`), or an empty string.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use roster_core::log_op_start;
/// log_op_start!("student_insert_many");
/// log_op_start!("student_get", student_id = 1);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use roster_core::log_op_end;
/// log_op_end!("student_count", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use roster_core::log_op_error;
/// # use roster_core::errors::RosterError;
/// let err = RosterError::StudentNotFound { id: 1 };
/// log_op_error!("student_delete", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_op = ex_err.op().unwrap_or_default(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_op = ex_err.op().unwrap_or_default(),
            $($field)*
        );
    }};
}
