// Navigation/session presentation
// Decides which nav entries are visible for the current session and keeps
// the logout handler wiring idempotent. Pure state; no rendering here.

use serde::{Deserialize, Serialize};

use crate::session::{Role, UserSession};

/// Visibility of each navigation entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavView {
    pub home: bool,
    pub marketplace: bool,
    pub dev_dashboard: bool,
    pub profile: bool,
    pub login_register: bool,
    pub logout: bool,
    /// `Welcome, {username} ({role})!` when logged in.
    pub username_display: Option<String>,
}

impl NavView {
    /// Home and marketplace are always visible; the rest depends on the
    /// session and its role.
    pub fn for_session(session: Option<&UserSession>) -> Self {
        match session {
            Some(user) => Self {
                home: true,
                marketplace: true,
                dev_dashboard: user.role == Role::Developer,
                profile: true,
                login_register: false,
                logout: true,
                username_display: Some(format!(
                    "Welcome, {} ({})!",
                    user.username, user.role
                )),
            },
            None => Self {
                home: true,
                marketplace: true,
                dev_dashboard: false,
                profile: false,
                login_register: true,
                logout: false,
                username_display: None,
            },
        }
    }
}

/// Guards the logout click handler so it is attached at most once, no
/// matter how often the nav is refreshed.
#[derive(Debug, Default)]
pub struct LogoutControl {
    attached: bool,
}

impl LogoutControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only on the first call; callers attach the handler
    /// exactly when this returns true.
    pub fn attach(&mut self) -> bool {
        if self.attached {
            false
        } else {
            self.attached = true;
            true
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}
