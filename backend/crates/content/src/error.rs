//! Content Error Types
//!
//! Content-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::consistency::CounterDrift;

/// Content-specific result type alias
pub type ContentResult<T> = Result<T, ContentError>;

#[derive(Debug, Error)]
pub enum ContentError {
    /// Malformed or missing input field
    #[error("{0}")]
    Validation(String),

    #[error("Post not found")]
    PostNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    #[error("User not found")]
    UserNotFound,

    /// A child with this id already exists; the event was already applied
    #[error("Duplicate identifier")]
    DuplicateId,

    /// Caller's account is missing or deactivated
    #[error("Account is not active")]
    AuthorInactive,

    #[error("Only the author can modify this post")]
    NotPostOwner,

    #[error("Only the comment author or the post owner can delete this comment")]
    NotCommentOwner,

    /// A counter adjustment could not be applied; the unit was rolled back
    #[error("Counter inconsistency on {entity} {id}: {detail}")]
    Consistency {
        entity: &'static str,
        id: Uuid,
        detail: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ContentError {
    pub fn drift(entity: &'static str, id: Uuid, drift: CounterDrift) -> Self {
        ContentError::Consistency {
            entity,
            id,
            detail: format!(
                "stored value {} cannot take delta {}",
                drift.current, drift.delta
            ),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::Validation(_) => ErrorKind::BadRequest,
            ContentError::PostNotFound
            | ContentError::CommentNotFound
            | ContentError::UserNotFound => ErrorKind::NotFound,
            ContentError::DuplicateId => ErrorKind::Conflict,
            ContentError::AuthorInactive => ErrorKind::Unauthorized,
            ContentError::NotPostOwner | ContentError::NotCommentOwner => ErrorKind::Forbidden,
            ContentError::Database(e) => database_kind(e),
            ContentError::Consistency { .. } | ContentError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ContentError::Validation(_) => "VALIDATION",
            ContentError::PostNotFound
            | ContentError::CommentNotFound
            | ContentError::UserNotFound => "NOT_FOUND",
            ContentError::DuplicateId => "CONFLICT",
            ContentError::AuthorInactive => "AUTHENTICATION",
            ContentError::NotPostOwner | ContentError::NotCommentOwner => "AUTHORIZATION",
            ContentError::Consistency { .. } => "CONSISTENCY",
            ContentError::Database(e) if database_kind(e) == ErrorKind::ServiceUnavailable => {
                "UNAVAILABLE"
            }
            ContentError::Database(_) | ContentError::Internal(_) => "INTERNAL",
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details are not exposed to the caller.
    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            ContentError::Consistency { .. } => "Counter update could not be applied".to_string(),
            ContentError::Database(_) if self.kind() == ErrorKind::ServiceUnavailable => {
                "Service temporarily unavailable".to_string()
            }
            ContentError::Database(_) | ContentError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let err = AppError::new(self.kind(), message).with_code(self.code());
        match self {
            ContentError::Database(_) if self.kind() == ErrorKind::ServiceUnavailable => {
                err.with_action("Please retry later")
            }
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ContentError::Consistency { entity, id, detail } => {
                tracing::error!(
                    entity = %entity,
                    id = %id,
                    detail = %detail,
                    "Counter propagation aborted; run counter repair"
                );
            }
            ContentError::Database(e) => {
                tracing::error!(error = %e, "Content database error");
            }
            ContentError::Internal(msg) => {
                tracing::error!(message = %msg, "Content internal error");
            }
            ContentError::NotPostOwner | ContentError::NotCommentOwner => {
                tracing::warn!(error = %self, "Ownership check failed");
            }
            _ => {
                tracing::debug!(error = %self, "Content error");
            }
        }
    }
}

impl IntoResponse for ContentError {
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
impl From<JsonRejection> for ContentError {
    fn from(rejection: JsonRejection) -> Self {
        ContentError::Validation(rejection.body_text())
    }
}

/// Malformed ids in the path are validation failures
impl From<PathRejection> for ContentError {
    fn from(rejection: PathRejection) -> Self {
        ContentError::Validation(rejection.body_text())
    }
}
