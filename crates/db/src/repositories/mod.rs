//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod attendance_lock_repo;
pub mod attendance_mark_repo;
pub mod student_repo;
pub mod user_repo;

pub use attendance_lock_repo::AttendanceLockRepo;
pub use attendance_mark_repo::AttendanceMarkRepo;
pub use student_repo::StudentRepo;
pub use user_repo::UserRepo;
