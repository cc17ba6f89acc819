//! Well-known role name constants.
//!
//! These must match the seed data in `db/migrations/20260810000001_create_roles_and_users.sql`.

/// Administrator role (관리자): full access including the admin console.
pub const ROLE_ADMIN: &str = "관리자";

/// Regular team member role (팀원).
pub const ROLE_MEMBER: &str = "팀원";
