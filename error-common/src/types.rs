use thiserror::Error;

use crate::codes;

/// Shared error enum for LabCare Engine crates
#[derive(Error, Debug)]
pub enum LmsError {
    /// Input validation errors, surfaced before computation or submission
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lookup matched nothing; a soft, expected condition
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network communication errors (connect, timeout, transport)
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered but rejected or failed the request
    #[error("Backend error: {0}")]
    Backend(String),

    /// Bearer token missing, expired, or rejected by the backend
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed payloads crossing the wire boundary
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal invariant violations
    #[error("Internal error: {0}")]
    Internal(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LmsError {
    /// Structured error code for API responses and log correlation
    pub fn code(&self) -> &'static str {
        match self {
            LmsError::Validation(_) => codes::validation::INVALID_INPUT,
            LmsError::NotFound(_) => codes::lookup::NO_MATCH,
            LmsError::Network(_) => codes::network::REQUEST_FAILED,
            LmsError::Backend(_) => codes::backend::REQUEST_REJECTED,
            LmsError::Unauthorized(_) => codes::auth::TOKEN_REJECTED,
            LmsError::Serialization(_) => codes::backend::MALFORMED_RESPONSE,
            LmsError::Internal(_) => codes::internal::UNEXPECTED,
            LmsError::Other(_) => codes::internal::UNEXPECTED,
        }
    }

    /// True when the session token was rejected and the caller should
    /// discard it and re-authenticate
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, LmsError::Unauthorized(_))
    }

    /// Short, user-presentable message with no internal detail
    pub fn user_message(&self) -> String {
        match self {
            LmsError::Validation(msg) | LmsError::NotFound(msg) => msg.clone(),
            LmsError::Network(_) => "Could not reach the server. Please try again.".to_string(),
            LmsError::Backend(_) => "The server could not complete the request.".to_string(),
            LmsError::Unauthorized(_) => "Your session has expired. Please sign in again.".to_string(),
            LmsError::Serialization(_) => "The server sent an unexpected response.".to_string(),
            LmsError::Internal(_) | LmsError::Other(_) => "Something went wrong.".to_string(),
        }
    }
}

/// Result type alias for LabCare operations
pub type LmsResult<T> = std::result::Result<T, LmsError>;

/// Async logging function for errors
pub async fn log_error(context: &str, error: &LmsError) {
    tracing::error!(
        context = context,
        error_code = error.code(),
        error = %error,
        "LabCare error occurred"
    );
}
