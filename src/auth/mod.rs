// Simulated Auth Dispatcher
// Register, login, Google login, and logout against a fixed demo credential
// table. Nothing is persisted beyond the session slot; registration has no
// side effect at all.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::LimitsConfig;
use crate::error::{ApiError, ApiResult};
use crate::session::{Role, SessionStore, UserSession};

/// Username reserved to demonstrate the duplicate-registration path.
pub const RESERVED_USERNAME: &str = "testuser";

/// The fixed demo credential table. No other account can log in.
const DEMO_CREDENTIALS: &[(&str, &str, Role)] = &[
    ("user1", "password", Role::User),
    ("dev1", "password", Role::Developer),
    (RESERVED_USERNAME, "password", Role::User),
];

/// Public view of an account, returned by the login endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicProfile {
    pub username: String,
    pub role: Role,
}

/// Successful login payload: profile plus the fabricated token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginSuccess {
    pub user: PublicProfile,
    pub token: String,
}

/// Simulated auth endpoints. Owns nothing but a handle to the session
/// store and the configured input bounds.
#[derive(Clone)]
pub struct AuthService {
    sessions: SessionStore,
    limits: LimitsConfig,
}

impl AuthService {
    pub fn new(sessions: SessionStore, limits: LimitsConfig) -> Self {
        Self { sessions, limits }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Register a new account. Validates the submitted fields and simulates
    /// a conflict for the reserved demo name; on success nothing is stored,
    /// the caller is just told to log in.
    pub fn register(&self, username: &str, password: &str, role: &str) -> ApiResult<String> {
        let username = username.trim();

        if username.is_empty() {
            return Err(ApiError::invalid("Username is required."));
        }
        if username.len() < self.limits.min_username_len {
            return Err(ApiError::invalid(format!(
                "Username must be at least {} characters long.",
                self.limits.min_username_len
            )));
        }
        if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ApiError::invalid(
                "Username can only contain letters, numbers, and underscores.",
            ));
        }
        if password.is_empty() {
            return Err(ApiError::invalid("Password is required."));
        }
        if password.len() < self.limits.min_password_len {
            return Err(ApiError::invalid(format!(
                "Password must be at least {} characters long.",
                self.limits.min_password_len
            )));
        }
        if Role::parse(role).is_none() {
            return Err(ApiError::invalid("Invalid role specified."));
        }

        if username.eq_ignore_ascii_case(RESERVED_USERNAME) {
            return Err(ApiError::Conflict(
                "Username already exists (Simulated Conflict).".to_string(),
            ));
        }

        info!(username, role, "Simulated registration accepted");
        Ok("Registration successful (Simulated). Please log in.".to_string())
    }

    /// Log in against the fixed demo table. A match fabricates a token and
    /// persists the session; a mismatch leaves any existing session intact.
    pub fn login(&self, username: &str, password: &str) -> ApiResult<LoginSuccess> {
        let lookup = username.to_ascii_lowercase();
        let matched = DEMO_CREDENTIALS
            .iter()
            .find(|(name, pass, _)| *name == lookup && *pass == password);

        match matched {
            Some((name, _, role)) => {
                let session = UserSession {
                    username: name.to_string(),
                    role: *role,
                    token: fabricate_token("fake-token-"),
                };
                self.sessions.set(session.clone());
                info!(username = name, role = %role, "Simulated login succeeded");
                Ok(LoginSuccess {
                    user: PublicProfile {
                        username: session.username,
                        role: session.role,
                    },
                    token: session.token,
                })
            }
            None => {
                warn!(username, "Simulated login rejected");
                Err(ApiError::Authentication(
                    "Invalid username or password (Simulated).".to_string(),
                ))
            }
        }
    }

    /// "Verify" a Google credential. The credential is never actually
    /// checked; any non-empty value fabricates a fresh user-role account.
    pub fn login_with_google(&self, credential: &str) -> ApiResult<LoginSuccess> {
        if credential.is_empty() {
            return Err(ApiError::invalid("Google credential is required."));
        }

        let session = UserSession {
            username: format!("google_user_{}", random_suffix(5)),
            role: Role::User,
            token: fabricate_token("fake-google-token-"),
        };
        self.sessions.set(session.clone());
        info!(username = %session.username, "Simulated Google login succeeded");

        Ok(LoginSuccess {
            user: PublicProfile {
                username: session.username,
                role: session.role,
            },
            token: session.token,
        })
    }

    /// Clear the session. Succeeds unconditionally.
    pub fn logout(&self) -> ApiResult<()> {
        self.sessions.clear();
        info!("Session cleared");
        Ok(())
    }
}

fn fabricate_token(prefix: &str) -> String {
    format!("{}{}", prefix, random_suffix(9))
}

fn random_suffix(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect()
}
