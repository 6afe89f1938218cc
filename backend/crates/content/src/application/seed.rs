//! Demo Data Use Case
//!
//! Two demo accounts, one post each, and a comment from each account on the
//! other's post. Everything goes through the regular register, login and
//! content use cases, so stored counters come out exactly as live traffic
//! would leave them. Runs only against a store with no users.

use std::sync::Arc;

use auth::application::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
use auth::{AuthConfig, AuthError, Identity, TokenService, UserRepository};

use crate::application::{CreateCommentUseCase, CreatePostInput, CreatePostUseCase};
use crate::domain::repository::ContentRepository;
use crate::error::{ContentError, ContentResult};

struct DemoAccount {
    user_name: &'static str,
    email: &'static str,
    password: &'static str,
    post_title: &'static str,
    post_content: &'static str,
    /// Left on the other account's post
    comment: &'static str,
}

static DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        user_name: "admin",
        email: "admin@example.com",
        password: "admin123",
        post_title: "Welcome to the blog",
        post_content: "A small blog API with accounts, posts and comments. \
                       Register, log in, and start writing.",
        comment: "Well written, keep it up!",
    },
    DemoAccount {
        user_name: "user",
        email: "user@example.com",
        password: "user123",
        post_title: "Notes on learning Rust",
        post_content: "Ownership, borrowing and traits take a while to click. \
                       These are the notes I kept along the way.",
        comment: "This blog is really easy to use!",
    },
];

/// What a seeding run created
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.users == 0
    }
}

pub struct SeedDemoDataUseCase<U, R>
where
    U: UserRepository,
    R: ContentRepository,
{
    users: Arc<U>,
    content: Arc<R>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
}

impl<U, R> SeedDemoDataUseCase<U, R>
where
    U: UserRepository,
    R: ContentRepository,
{
    pub fn new(
        users: Arc<U>,
        content: Arc<R>,
        config: Arc<AuthConfig>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            content,
            config,
            tokens,
        }
    }

    /// Load the demo data unless any user exists
    pub async fn execute(&self) -> ContentResult<SeedReport> {
        let mut report = SeedReport::default();
        if !self.content.all_user_ids().await?.is_empty() {
            tracing::info!("Users present, skipping demo data");
            return Ok(report);
        }

        let mut callers = Vec::with_capacity(DEMO_ACCOUNTS.len());
        for account in &DEMO_ACCOUNTS {
            callers.push(self.register_and_login(account).await?);
            report.users += 1;
        }

        let mut post_ids = Vec::with_capacity(DEMO_ACCOUNTS.len());
        for (account, caller) in DEMO_ACCOUNTS.iter().zip(&callers) {
            let output = CreatePostUseCase::new(self.content.clone())
                .execute(
                    caller,
                    CreatePostInput {
                        title: account.post_title.to_string(),
                        content: account.post_content.to_string(),
                    },
                )
                .await?;
            post_ids.push(output.post.post_id);
            report.posts += 1;
        }

        // Each account comments on the next account's post
        for (i, (account, caller)) in DEMO_ACCOUNTS.iter().zip(&callers).enumerate() {
            let post_id = post_ids[(i + 1) % post_ids.len()];
            CreateCommentUseCase::new(self.content.clone())
                .execute(caller, post_id, account.comment.to_string())
                .await?;
            report.comments += 1;
        }

        tracing::info!(
            users = report.users,
            posts = report.posts,
            comments = report.comments,
            "Demo data loaded"
        );
        Ok(report)
    }

    async fn register_and_login(&self, account: &DemoAccount) -> ContentResult<Identity> {
        RegisterUseCase::new(self.users.clone(), self.config.clone())
            .execute(RegisterInput {
                user_name: account.user_name.to_string(),
                email: account.email.to_string(),
                password: account.password.to_string(),
            })
            .await
            .map_err(seed_error(account))?;

        let issued = LoginUseCase::new(
            self.users.clone(),
            self.config.clone(),
            self.tokens.clone(),
        )
        .execute(LoginInput {
            user_name: account.user_name.to_string(),
            password: account.password.to_string(),
        })
        .await
        .map_err(seed_error(account))?;

        Ok(issued.identity)
    }
}

fn seed_error(account: &DemoAccount) -> impl FnOnce(AuthError) -> ContentError + '_ {
    move |err| ContentError::Internal(format!("demo account {}: {err}", account.user_name))
}
