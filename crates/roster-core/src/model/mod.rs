//! Record model for the `students` table

pub mod column;
pub mod student;

pub use column::{SortDirection, StudentColumn};
pub use student::{sample_students, NewStudent, OrNone, Student, EMAIL_MAX_LEN};
