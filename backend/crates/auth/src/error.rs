//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing input field
    #[error("{0}")]
    Validation(String),

    #[error("User name already exists")]
    UserNameTaken,

    #[error("Email already exists")]
    EmailTaken,

    /// Unknown user name or wrong password (deliberately indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing bearer token")]
    TokenMissing,

    /// Malformed token or bad signature
    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token has expired")]
    TokenExpired,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::UserNameTaken | AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::TokenMissing
            | AuthError::TokenInvalid
            | AuthError::TokenExpired => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Database(e) => database_kind(e),
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "VALIDATION",
            AuthError::UserNameTaken | AuthError::EmailTaken => "CONFLICT",
            AuthError::InvalidCredentials
            | AuthError::TokenMissing
            | AuthError::TokenInvalid
            | AuthError::TokenExpired => "AUTHENTICATION",
            AuthError::UserNotFound => "NOT_FOUND",
            AuthError::Database(e) if database_kind(e) == ErrorKind::ServiceUnavailable => {
                "UNAVAILABLE"
            }
            AuthError::Database(_) | AuthError::Internal(_) => "INTERNAL",
        }
    }

    /// Field that collided, for conflict outcomes
    pub fn conflict_field(&self) -> Option<&'static str> {
        match self {
            AuthError::UserNameTaken => Some("username"),
            AuthError::EmailTaken => Some("email"),
            _ => None,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details are not exposed to the caller.
    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            AuthError::Database(_) if self.kind() == ErrorKind::ServiceUnavailable => {
                "Service temporarily unavailable".to_string()
            }
            AuthError::Database(_) | AuthError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        let mut err = AppError::new(self.kind(), message).with_code(self.code());
        if let Some(field) = self.conflict_field() {
            err = err.with_field(field);
        }
        match self {
            AuthError::UserNameTaken => err.with_action("Please choose a different user name"),
            AuthError::EmailTaken => err.with_action("Please use a different email address"),
            AuthError::TokenExpired => err.with_action("Please log in again"),
            AuthError::Database(_) if self.kind() == ErrorKind::ServiceUnavailable => {
                err.with_action("Please retry later")
            }
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenInvalid => {
                tracing::warn!("Rejected request with invalid token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Database outages surface as 503, every other database failure as 500
fn database_kind(err: &sqlx::Error) -> ErrorKind {
    match AppError::from_sqlx(err).kind() {
        ErrorKind::ServiceUnavailable => ErrorKind::ServiceUnavailable,
        _ => ErrorKind::InternalServerError,
    }
}

/// Unreadable request bodies are validation failures
impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::Validation(rejection.body_text())
    }
}

/// Value objects report validation failures as `AppError`
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}
