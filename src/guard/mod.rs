// Page-level access checks
// The pure decision behind "check auth and redirect": given the current
// session and an optional required role, either grant access or name the
// page to send the visitor to.

use crate::session::{Role, UserSession};

/// Default page an unauthorized visitor is sent to.
pub const DEFAULT_REDIRECT: &str = "index.html";

/// Outcome of a page-load access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Granted(UserSession),
    Denied { redirect: String },
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted(_))
    }
}

/// Grant access when a session exists and, if a role is required, the
/// session carries it.
pub fn check_auth(session: Option<UserSession>, required_role: Option<Role>) -> AccessDecision {
    check_auth_with_redirect(session, required_role, DEFAULT_REDIRECT)
}

pub fn check_auth_with_redirect(
    session: Option<UserSession>,
    required_role: Option<Role>,
    redirect: &str,
) -> AccessDecision {
    match session {
        None => AccessDecision::Denied { redirect: redirect.to_string() },
        Some(user) => match required_role {
            Some(role) if user.role != role => {
                AccessDecision::Denied { redirect: redirect.to_string() }
            }
            _ => AccessDecision::Granted(user),
        },
    }
}
