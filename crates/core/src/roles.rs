//! Well-known role names stored in `users.role`.

/// Full access, including student administration.
pub const ROLE_ADMIN: &str = "admin";

/// May submit attendance and read class status.
pub const ROLE_TEACHER: &str = "teacher";

/// Whether `role` is one of the roles above.
pub fn is_known_role(role: &str) -> bool {
    matches!(role, ROLE_ADMIN | ROLE_TEACHER)
}
