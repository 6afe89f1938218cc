//! Counter Repair Use Case
//!
//! Recounts children and overwrites stored counters. Safe to run at any
//! time: already-correct counters are left untouched, and each recount runs
//! in the same atomic unit discipline as regular writes.

use std::sync::Arc;

use kernel::id::{PostId, UserId};

use crate::domain::consistency::{PostRepair, RepairReport, UserRepair};
use crate::domain::repository::ContentRepository;
use crate::error::{ContentError, ContentResult};

pub struct RepairCountersUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> RepairCountersUseCase<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn repair_post(&self, post_id: PostId) -> ContentResult<PostRepair> {
        let repair = self
            .repo
            .repair_post(&post_id)
            .await?
            .ok_or(ContentError::PostNotFound)?;
        log_post_repair(&repair);
        Ok(repair)
    }

    pub async fn repair_user(&self, user_id: UserId) -> ContentResult<UserRepair> {
        let repair = self
            .repo
            .repair_user(&user_id)
            .await?
            .ok_or(ContentError::UserNotFound)?;
        log_user_repair(&repair);
        Ok(repair)
    }

    /// Reconcile every post and every user
    ///
    /// Entities that vanish between listing and recounting are skipped.
    pub async fn repair_all(&self) -> ContentResult<RepairReport> {
        let mut report = RepairReport::default();

        for post_id in self.repo.all_post_ids().await? {
            if let Some(repair) = self.repo.repair_post(&post_id).await? {
                report.posts_checked += 1;
                if repair.corrected() {
                    log_post_repair(&repair);
                    report.posts_corrected.push(repair);
                }
            }
        }

        for user_id in self.repo.all_user_ids().await? {
            if let Some(repair) = self.repo.repair_user(&user_id).await? {
                report.users_checked += 1;
                if repair.corrected() {
                    log_user_repair(&repair);
                    report.users_corrected.push(repair);
                }
            }
        }

        tracing::info!(
            posts_checked = report.posts_checked,
            users_checked = report.users_checked,
            posts_corrected = report.posts_corrected.len(),
            users_corrected = report.users_corrected.len(),
            "Counter reconciliation finished"
        );

        Ok(report)
    }
}

fn log_post_repair(repair: &PostRepair) {
    if repair.corrected() {
        tracing::warn!(
            post_id = %repair.post_id,
            before = repair.before.comment_count,
            after = repair.after.comment_count,
            "Corrected post comment counter"
        );
    }
}

fn log_user_repair(repair: &UserRepair) {
    if repair.corrected() {
        tracing::warn!(
            user_id = %repair.user_id,
            before = repair.before,
            after = repair.after,
            "Corrected user post counter"
        );
    }
}
