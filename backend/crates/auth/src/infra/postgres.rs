//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, UserName, UserPassword};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    user_id,
    user_name,
    email,
    password_hash,
    post_count,
    created_at,
    updated_at,
    deleted_at
"#;

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, predicate: &str, value: &str) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {predicate}");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }
}

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                user_name,
                user_name_canonical,
                email,
                password_hash,
                post_count,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.post_count)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        self.find_one("user_name_canonical = $1", user_name.canonical())
            .await
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.find_one("email = $1", email.as_str()).await
    }

    async fn soft_delete(&self, user_id: &UserId) -> AuthResult<bool> {
        let affected = sqlx::query(
            r#"
            UPDATE users
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE user_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected == 1)
    }
}

/// Map a unique violation on `users` to the field that collided
fn map_unique_violation(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23505")
    {
        match db_err.constraint() {
            Some(c) if c.contains("email") => return AuthError::EmailTaken,
            Some(c) if c.contains("user_name") => return AuthError::UserNameTaken,
            _ => {}
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    user_name: String,
    email: String,
    password_hash: String,
    post_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            user_name: UserName::from_db(self.user_name),
            email: Email::from_db(self.email),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            post_count: self.post_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}
