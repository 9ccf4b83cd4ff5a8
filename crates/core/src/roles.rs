//! Household membership roles.
//!
//! Roles are scoped to a single household: the same user can be an
//! `admin` of one household and a plain `member` of another.

/// Full control over the household: update/delete it, manage invitations.
pub const ROLE_ADMIN: &str = "admin";

/// Regular membership: view analytics, manage tags and events.
pub const ROLE_MEMBER: &str = "member";

/// All valid household roles.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MEMBER];

/// Check whether a string names a valid household role.
pub fn is_valid_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}
