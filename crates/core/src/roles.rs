//! Role names carried in session tokens issued by the login service.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_AGENCY_USER: &str = "agency_user";

/// Whether `role` grants access to every user's submissions.
pub fn is_admin(role: &str) -> bool {
    role == ROLE_ADMIN
}
