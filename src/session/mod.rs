// Session store
// Holds the single "current user" slot that stands in for the tab-scoped
// session key. Only the login and logout paths may mutate it.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Role attached to a session at registration or login time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Developer,
}

impl Role {
    /// Parse the wire spelling used by the registration form.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "user" => Some(Role::User),
            "developer" => Some(Role::Developer),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Developer => write!(f, "developer"),
        }
    }
}

/// The ephemeral record of the currently logged-in user.
/// Lost when the store is dropped; nothing here is durable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSession {
    pub username: String,
    pub role: Role,
    /// Opaque fabricated token, not cryptographically meaningful.
    pub token: String,
}

/// One session slot per store instance.
/// Constructed explicitly and passed into the services that need it, so
/// tests can build isolated instances instead of sharing ambient state.
#[derive(Clone, Default)]
pub struct SessionStore {
    slot: Arc<Mutex<Option<UserSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current session. Login paths only.
    pub fn set(&self, session: UserSession) {
        *self.slot.lock() = Some(session);
    }

    /// Clear the current session. Safe to call when already empty.
    pub fn clear(&self) {
        *self.slot.lock() = None;
    }

    /// Snapshot of the current session, if any.
    pub fn current(&self) -> Option<UserSession> {
        self.slot.lock().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.slot.lock().is_some()
    }
}
