// Failure taxonomy for the simulated marketplace API
// Every dispatcher failure carries a status-like code; the client wrapper
// layer flattens these into plain { success: false, message } values.

use thiserror::Error;

/// Errors produced by the simulated auth and apps dispatchers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed or missing input. Aggregates every violation found, not
    /// just the first one.
    #[error("Validation failed: {}", .0.join(" "))]
    Validation(Vec<String>),

    /// No session where one is required, or bad credentials.
    #[error("{0}")]
    Authentication(String),

    /// Session present but the acting user does not own the resource.
    #[error("Unauthorized: {0}")]
    Authorization(String),

    /// Referenced id is absent from the catalog.
    #[error("{0}")]
    NotFound(String),

    /// Duplicate registration (simulated, reserved demo name only).
    #[error("{0}")]
    Conflict(String),
}

impl ApiError {
    /// HTTP-equivalent status code for the fabricated response.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::Authentication(_) => 401,
            ApiError::Authorization(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
        }
    }

    /// Validation error with a single violation.
    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::Validation(vec![message.into()])
    }

    /// No user logged in.
    pub fn not_logged_in() -> Self {
        ApiError::Authentication("Unauthorized: User not logged in (Simulated).".to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
