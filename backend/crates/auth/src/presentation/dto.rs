//! API DTOs (Data Transfer Objects)
//!
//! Missing request fields default to empty and fail validation in the use
//! cases, like the content DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Register
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Bearer token plus its decoded payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Always `"Bearer"`
    pub token_type: &'static str,
    pub user_id: Uuid,
    pub username: String,
    /// Unix milliseconds
    pub issued_at: i64,
    /// Unix milliseconds
    pub expires_at: i64,
}
