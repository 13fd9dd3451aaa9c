//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and partial updates where the table has them

pub mod attendance;
pub mod student;
pub mod user;
