//! PostgreSQL Repository Implementation
//!
//! Each atomic unit is one transaction. Counter adjustments are single
//! `UPDATE ... SET n = n + $delta ... RETURNING` statements, so concurrent
//! units serialize on the parent row lock and never lose an update.
//! `has_comments` is always written in the same statement as
//! `comment_count`, derived from the adjusted value.
//!
//! Reads join `users` for the author's display name; the column lists
//! below assume the aliases `p`/`c` for the child table and `u` for users.

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::consistency::{CounterEvent, PostRepair, UserRepair};
use crate::domain::entities::{Comment, Page, Post, PostCounters};
use crate::domain::repository::ContentRepository;
use crate::domain::value_objects::{PageRequest, PostBody, PostTitle};
use crate::error::{ContentError, ContentResult};

const POST_COLUMNS: &str = r#"
    p.post_id,
    p.author_id,
    u.user_name AS author_name,
    p.title,
    p.content,
    p.comment_count,
    p.has_comments,
    p.created_at,
    p.updated_at,
    p.deleted_at
"#;

const COMMENT_COLUMNS: &str = r#"
    c.comment_id,
    c.post_id,
    c.author_id,
    u.user_name AS author_name,
    c.content,
    c.created_at,
    c.deleted_at
"#;

const ADJUST_USER_POST_COUNT: &str = r#"
    UPDATE users
    SET post_count = post_count + $2
    WHERE user_id = $1
    RETURNING post_count
"#;

const ADJUST_POST_COMMENT_COUNT: &str = r#"
    UPDATE posts
    SET comment_count = comment_count + $2,
        has_comments = (comment_count + $2) > 0
    WHERE post_id = $1
    RETURNING comment_count, has_comments
"#;

/// PostgreSQL-backed content store
#[derive(Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ContentRepository for PgContentRepository {
    async fn create_post(&self, post: &Post) -> ContentResult<i64> {
        let mut tx = self.pool.begin().await?;

        let post_count: i64 = sqlx::query_scalar(
            r#"
            UPDATE users
            SET post_count = post_count + $2
            WHERE user_id = $1 AND deleted_at IS NULL
            RETURNING post_count
            "#,
        )
        .bind(post.author_id.as_uuid())
        .bind(CounterEvent::PostCreated.delta())
        .fetch_optional(&mut *tx)
        .await
        .map_err(counter_error("user", post.author_id.into_uuid()))?
        .ok_or(ContentError::AuthorInactive)?;

        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                author_id,
                title,
                content,
                comment_count,
                has_comments,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.author_id.as_uuid())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.counters.comment_count)
        .bind(post.counters.has_comments)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(insert_error)?;

        tx.commit().await?;
        Ok(post_count)
    }

    async fn update_post(
        &self,
        post_id: &PostId,
        title: &PostTitle,
        content: &PostBody,
    ) -> ContentResult<Post> {
        let sql = format!(
            r#"
            UPDATE posts p
            SET title = $2, content = $3, updated_at = NOW()
            FROM users u
            WHERE p.post_id = $1 AND p.deleted_at IS NULL AND u.user_id = p.author_id
            RETURNING {POST_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(post_id.as_uuid())
            .bind(title.as_str())
            .bind(content.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ContentError::PostNotFound)?;

        Ok(row.into_post())
    }

    async fn soft_delete_post(&self, post_id: &PostId) -> ContentResult<i64> {
        let mut tx = self.pool.begin().await?;

        // Only the live-to-deleted transition moves the counter
        let author_id: Uuid = sqlx::query_scalar(
            r#"
            UPDATE posts
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE post_id = $1 AND deleted_at IS NULL
            RETURNING author_id
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ContentError::PostNotFound)?;

        let post_count: i64 = sqlx::query_scalar(ADJUST_USER_POST_COUNT)
            .bind(author_id)
            .bind(CounterEvent::PostDeleted.delta())
            .fetch_optional(&mut *tx)
            .await
            .map_err(counter_error("user", author_id))?
            .ok_or(ContentError::UserNotFound)?;

        tx.commit().await?;
        Ok(post_count)
    }

    async fn create_comment(&self, comment: &Comment) -> ContentResult<PostCounters> {
        let mut tx = self.pool.begin().await?;

        let author_active: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1 AND deleted_at IS NULL)",
        )
        .bind(comment.author_id.as_uuid())
        .fetch_one(&mut *tx)
        .await?;
        if !author_active {
            return Err(ContentError::AuthorInactive);
        }

        // Locks the parent row; a concurrent delete of the post makes this miss
        let (comment_count, has_comments): (i64, bool) = sqlx::query_as(
            r#"
            UPDATE posts
            SET comment_count = comment_count + $2,
                has_comments = (comment_count + $2) > 0
            WHERE post_id = $1 AND deleted_at IS NULL
            RETURNING comment_count, has_comments
            "#,
        )
        .bind(comment.post_id.as_uuid())
        .bind(CounterEvent::CommentCreated.delta())
        .fetch_optional(&mut *tx)
        .await
        .map_err(counter_error("post", comment.post_id.into_uuid()))?
        .ok_or(ContentError::PostNotFound)?;

        sqlx::query(
            r#"
            INSERT INTO comments (
                comment_id,
                post_id,
                author_id,
                content,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.post_id.as_uuid())
        .bind(comment.author_id.as_uuid())
        .bind(&comment.content)
        .bind(comment.created_at)
        .execute(&mut *tx)
        .await
        .map_err(insert_error)?;

        tx.commit().await?;
        Ok(PostCounters {
            comment_count,
            has_comments,
        })
    }

    async fn soft_delete_comment(&self, comment_id: &CommentId) -> ContentResult<PostCounters> {
        let mut tx = self.pool.begin().await?;

        let post_id: Uuid = sqlx::query_scalar(
            r#"
            UPDATE comments
            SET deleted_at = NOW()
            WHERE comment_id = $1 AND deleted_at IS NULL
            RETURNING post_id
            "#,
        )
        .bind(comment_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ContentError::CommentNotFound)?;

        let (comment_count, has_comments): (i64, bool) =
            sqlx::query_as(ADJUST_POST_COMMENT_COUNT)
                .bind(post_id)
                .bind(CounterEvent::CommentDeleted.delta())
                .fetch_optional(&mut *tx)
                .await
                .map_err(counter_error("post", post_id))?
                .ok_or(ContentError::PostNotFound)?;

        tx.commit().await?;
        Ok(PostCounters {
            comment_count,
            has_comments,
        })
    }

    async fn find_post(&self, post_id: &PostId) -> ContentResult<Option<Post>> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN users u ON u.user_id = p.author_id
            WHERE p.post_id = $1 AND p.deleted_at IS NULL
            "#
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(post_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn find_post_author(&self, post_id: &PostId) -> ContentResult<Option<UserId>> {
        let author_id: Option<Uuid> =
            sqlx::query_scalar("SELECT author_id FROM posts WHERE post_id = $1")
                .bind(post_id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

        Ok(author_id.map(UserId::from_uuid))
    }

    async fn find_comment(&self, comment_id: &CommentId) -> ContentResult<Option<Comment>> {
        let sql = format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments c
            JOIN users u ON u.user_id = c.author_id
            WHERE c.comment_id = $1 AND c.deleted_at IS NULL
            "#
        );
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(comment_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn list_posts(&self, page: PageRequest) -> ContentResult<Page<Post>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE deleted_at IS NULL")
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN users u ON u.user_id = p.author_id
            WHERE p.deleted_at IS NULL
            ORDER BY p.created_at DESC, p.post_id
            LIMIT $1 OFFSET $2
            "#
        );
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page {
            items: rows.into_iter().map(PostRow::into_post).collect(),
            page: page.page(),
            page_size: page.page_size(),
            total,
        })
    }

    async fn list_comments(&self, post_id: &PostId) -> ContentResult<Vec<Comment>> {
        let sql = format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments c
            JOIN users u ON u.user_id = c.author_id
            WHERE c.post_id = $1 AND c.deleted_at IS NULL
            ORDER BY c.created_at DESC, c.comment_id
            "#
        );
        let rows = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(post_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn user_post_count(&self, user_id: &UserId) -> ContentResult<Option<i64>> {
        let count = sqlx::query_scalar("SELECT post_count FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(count)
    }

    async fn repair_post(&self, post_id: &PostId) -> ContentResult<Option<PostRepair>> {
        let mut tx = self.pool.begin().await?;

        let stored: Option<(i64, bool)> = sqlx::query_as(
            "SELECT comment_count, has_comments FROM posts WHERE post_id = $1 FOR UPDATE",
        )
        .bind(post_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;
        let Some((comment_count, has_comments)) = stored else {
            return Ok(None);
        };

        let live_comments: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM comments WHERE post_id = $1 AND deleted_at IS NULL",
        )
        .bind(post_id.as_uuid())
        .fetch_one(&mut *tx)
        .await?;

        let before = PostCounters {
            comment_count,
            has_comments,
        };
        let after = PostCounters::recount(live_comments);
        if before != after {
            sqlx::query("UPDATE posts SET comment_count = $2, has_comments = $3 WHERE post_id = $1")
                .bind(post_id.as_uuid())
                .bind(after.comment_count)
                .bind(after.has_comments)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(PostRepair {
            post_id: *post_id,
            before,
            after,
        }))
    }

    async fn repair_user(&self, user_id: &UserId) -> ContentResult<Option<UserRepair>> {
        let mut tx = self.pool.begin().await?;

        let stored: Option<i64> =
            sqlx::query_scalar("SELECT post_count FROM users WHERE user_id = $1 FOR UPDATE")
                .bind(user_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await?;
        let Some(before) = stored else {
            return Ok(None);
        };

        let after: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM posts WHERE author_id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id.as_uuid())
        .fetch_one(&mut *tx)
        .await?;

        if before != after {
            sqlx::query("UPDATE users SET post_count = $2 WHERE user_id = $1")
                .bind(user_id.as_uuid())
                .bind(after)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(UserRepair {
            user_id: *user_id,
            before,
            after,
        }))
    }

    async fn all_post_ids(&self) -> ContentResult<Vec<PostId>> {
        let ids: Vec<Uuid> = sqlx::query_scalar("SELECT post_id FROM posts ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids.into_iter().map(PostId::from_uuid).collect())
    }

    async fn all_user_ids(&self) -> ContentResult<Vec<UserId>> {
        let ids: Vec<Uuid> = sqlx::query_scalar("SELECT user_id FROM users ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids.into_iter().map(UserId::from_uuid).collect())
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

/// A `CHECK (... >= 0)` violation on a counter means the stored value drifted
fn counter_error(entity: &'static str, id: Uuid) -> impl FnOnce(sqlx::Error) -> ContentError {
    move |err| {
        let check_violation = matches!(
            &err,
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23514")
        );
        if check_violation {
            ContentError::Consistency {
                entity,
                id,
                detail: "counter would become negative".to_string(),
            }
        } else {
            ContentError::Database(err)
        }
    }
}

/// Primary-key collision means the child was already written
fn insert_error(err: sqlx::Error) -> ContentError {
    let unique_violation = matches!(
        &err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    );
    if unique_violation {
        ContentError::DuplicateId
    } else {
        ContentError::Database(err)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    author_id: Uuid,
    author_name: String,
    title: String,
    content: String,
    comment_count: i64,
    has_comments: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::from_uuid(self.post_id),
            author_id: UserId::from_uuid(self.author_id),
            author_name: self.author_name,
            title: self.title,
            content: self.content,
            counters: PostCounters {
                comment_count: self.comment_count,
                has_comments: self.has_comments,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    post_id: Uuid,
    author_id: Uuid,
    author_name: String,
    content: String,
    created_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_uuid(self.comment_id),
            post_id: PostId::from_uuid(self.post_id),
            author_id: UserId::from_uuid(self.author_id),
            author_name: self.author_name,
            content: self.content,
            created_at: self.created_at,
            deleted_at: self.deleted_at,
        }
    }
}
