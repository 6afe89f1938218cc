//! HTTP Handlers

use std::sync::Arc;

use auth::{CurrentUser, TokenService};
use axum::Json;
use axum::extract::{FromRef, Query, State};
use axum::http::StatusCode;
use kernel::id::{CommentId, PostId};
use uuid::Uuid;

use crate::application::{
    ContentQueries, CreateCommentUseCase, CreatePostInput, CreatePostUseCase,
    DeleteCommentUseCase, DeletePostUseCase, UpdatePostInput, UpdatePostUseCase,
};
use crate::domain::repository::ContentRepository;
use crate::domain::value_objects::PageRequest;
use crate::error::ContentResult;
use crate::presentation::dto::{
    CommentResponse, CreateCommentRequest, CreateCommentResponse, CreatePostResponse,
    ListPostsQuery, PostCountersResponse, PostDetailResponse, PostListResponse, PostRequest,
    PostResponse,
};
use crate::presentation::extract::{JsonBody, PathParam};

/// Shared state for content handlers
#[derive(Clone)]
pub struct ContentAppState<R>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
}

impl<R> FromRef<ContentAppState<R>> for Arc<TokenService>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &ContentAppState<R>) -> Self {
        state.tokens.clone()
    }
}

// ============================================================================
// Public reads
// ============================================================================

/// GET /api/posts
pub async fn list_posts<R>(
    State(state): State<ContentAppState<R>>,
    Query(query): Query<ListPostsQuery>,
) -> ContentResult<Json<PostListResponse>>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    let page = PageRequest::parse(query.page.as_deref(), query.page_size.as_deref());
    let posts = ContentQueries::new(state.repo.clone())
        .list_posts(page)
        .await?;

    Ok(Json(posts.into()))
}

/// GET /api/posts/{id}
pub async fn get_post<R>(
    State(state): State<ContentAppState<R>>,
    PathParam(post_id): PathParam<Uuid>,
) -> ContentResult<Json<PostDetailResponse>>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    let (post, comments) = ContentQueries::new(state.repo.clone())
        .get_post(PostId::from_uuid(post_id))
        .await?;

    Ok(Json(PostDetailResponse {
        post: post.into(),
        comments: comments.into_iter().map(CommentResponse::from).collect(),
    }))
}

/// GET /api/posts/{id}/comments
pub async fn list_comments<R>(
    State(state): State<ContentAppState<R>>,
    PathParam(post_id): PathParam<Uuid>,
) -> ContentResult<Json<Vec<CommentResponse>>>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    let comments = ContentQueries::new(state.repo.clone())
        .list_comments(PostId::from_uuid(post_id))
        .await?;

    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

// ============================================================================
// Posts
// ============================================================================

/// POST /api/posts
pub async fn create_post<R>(
    State(state): State<ContentAppState<R>>,
    CurrentUser(caller): CurrentUser,
    JsonBody(req): JsonBody<PostRequest>,
) -> ContentResult<(StatusCode, Json<CreatePostResponse>)>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    let output = CreatePostUseCase::new(state.repo.clone())
        .execute(
            &caller,
            CreatePostInput {
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            post: output.post.into(),
            author_post_count: output.author_post_count,
        }),
    ))
}

/// PUT /api/posts/{id}
pub async fn update_post<R>(
    State(state): State<ContentAppState<R>>,
    CurrentUser(caller): CurrentUser,
    PathParam(post_id): PathParam<Uuid>,
    JsonBody(req): JsonBody<PostRequest>,
) -> ContentResult<Json<PostResponse>>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    let post = UpdatePostUseCase::new(state.repo.clone())
        .execute(
            &caller,
            PostId::from_uuid(post_id),
            UpdatePostInput {
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    Ok(Json(post.into()))
}

/// DELETE /api/posts/{id}
pub async fn delete_post<R>(
    State(state): State<ContentAppState<R>>,
    CurrentUser(caller): CurrentUser,
    PathParam(post_id): PathParam<Uuid>,
) -> ContentResult<StatusCode>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    DeletePostUseCase::new(state.repo.clone())
        .execute(&caller, PostId::from_uuid(post_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Comments
// ============================================================================

/// POST /api/posts/{id}/comments
pub async fn create_comment<R>(
    State(state): State<ContentAppState<R>>,
    CurrentUser(caller): CurrentUser,
    PathParam(post_id): PathParam<Uuid>,
    JsonBody(req): JsonBody<CreateCommentRequest>,
) -> ContentResult<(StatusCode, Json<CreateCommentResponse>)>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    let output = CreateCommentUseCase::new(state.repo.clone())
        .execute(&caller, PostId::from_uuid(post_id), req.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCommentResponse {
            comment: output.comment.into(),
            post_comment_count: output.counters.comment_count,
            post_has_comments: output.counters.has_comments,
        }),
    ))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment<R>(
    State(state): State<ContentAppState<R>>,
    CurrentUser(caller): CurrentUser,
    PathParam(comment_id): PathParam<Uuid>,
) -> ContentResult<Json<PostCountersResponse>>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    let deleted = DeleteCommentUseCase::new(state.repo.clone())
        .execute(&caller, CommentId::from_uuid(comment_id))
        .await?;

    Ok(Json(PostCountersResponse {
        post_id: deleted.post_id.into_uuid(),
        comment_count: deleted.counters.comment_count,
        has_comments: deleted.counters.has_comments,
    }))
}
