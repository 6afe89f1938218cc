//! Error conversions - From implementations for common error types
//!
//! Provides classification of `sqlx::Error` into [`AppError`] and the
//! HTTP rendering of [`AppError`] as RFC 7807 problem details.

#[cfg(any(feature = "sqlx", feature = "axum"))]
use super::app_error::AppError;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl AppError {
    /// Classify a database error by reference
    ///
    /// Crate errors keep ownership of their `sqlx::Error` for logging, so
    /// they use this instead of the `From` impl. The source is not attached.
    pub fn from_sqlx(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::service_unavailable("Database connection pool exhausted")
            }
            sqlx::Error::Database(db_err) => {
                // PostgreSQL specific error codes
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                match db_err.code().as_deref() {
                    // Class 23: Integrity Constraint Violation
                    Some("23505") => AppError::conflict("Duplicate key value"),
                    Some("23503") => AppError::conflict("Foreign key violation"),
                    Some("23502") => AppError::bad_request("Required field is null"),
                    Some("23514") => AppError::internal("Check constraint violation"),
                    // Class 53: Insufficient Resources, Class 57: Operator Intervention
                    Some("53000" | "53100" | "53200" | "53300") => {
                        AppError::service_unavailable("Database resource exhausted")
                    }
                    Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                        AppError::service_unavailable("Database unavailable")
                    }
                    _ => AppError::internal("Database error"),
                }
            }
            sqlx::Error::Io(_) => AppError::service_unavailable("Database connection error"),
            _ => AppError::internal("Database error"),
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::from_sqlx(&err).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let mut body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
            "code": self.code(),
        });
        // Extension member, present only when an input field is to blame
        if let (Some(field), Some(map)) = (self.field(), body.as_object_mut()) {
            map.insert("field".to_string(), serde_json::Value::from(field));
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "sqlx"))]
mod sqlx_tests {
    use super::*;
    use crate::error::kind::ErrorKind;
    use std::error::Error;

    #[test]
    fn test_pool_exhaustion_is_unavailable() {
        let err = AppError::from_sqlx(&sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(err.status_code(), 503);
        assert!(err.source().is_none());
    }

    #[test]
    fn test_from_keeps_source() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), 404);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unknown_errors_are_internal() {
        let err = AppError::from_sqlx(&sqlx::Error::Protocol("unexpected message".into()));
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    async fn body_of(err: AppError) -> serde_json::Value {
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_problem_details_body() {
        let response = AppError::conflict("Username already exists")
            .with_code("CONFLICT")
            .into_response();
        assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 409);
        assert_eq!(body["title"], "Conflict");
        assert_eq!(body["code"], "CONFLICT");
        assert_eq!(body["detail"], "Username already exists");
        assert!(body.get("field").is_none());
    }

    #[tokio::test]
    async fn test_field_member() {
        let body = body_of(
            AppError::conflict("Email already exists")
                .with_code("CONFLICT")
                .with_field("email"),
        )
        .await;
        assert_eq!(body["field"], "email");
    }
}
