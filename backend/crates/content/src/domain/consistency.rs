//! Consistency Engine rules
//!
//! Every lifecycle event maps to exactly one counter adjustment on exactly
//! one parent:
//!
//! | Event            | Parent | Adjustment                                   |
//! |------------------|--------|----------------------------------------------|
//! | `PostCreated`    | User   | `post_count += 1`                            |
//! | `PostDeleted`    | User   | `post_count -= 1`                            |
//! | `CommentCreated` | Post   | `comment_count += 1`, `has_comments := true` |
//! | `CommentDeleted` | Post   | `comment_count -= 1`, `has_comments := count > 0` |
//!
//! Stores apply the adjustment inside the same atomic unit that writes the
//! child row. A counter that would go negative means the stored value has
//! drifted; the unit is aborted and the repair path restores it.

use kernel::id::{PostId, UserId};

use crate::domain::entities::PostCounters;

/// Lifecycle event that moves a denormalized counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterEvent {
    PostCreated,
    PostDeleted,
    CommentCreated,
    CommentDeleted,
}

impl CounterEvent {
    pub const fn delta(self) -> i64 {
        match self {
            CounterEvent::PostCreated | CounterEvent::CommentCreated => 1,
            CounterEvent::PostDeleted | CounterEvent::CommentDeleted => -1,
        }
    }
}

/// A counter adjustment that would leave a negative value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterDrift {
    pub current: i64,
    pub delta: i64,
}

/// Apply `event` to a stored count
pub fn adjust(current: i64, event: CounterEvent) -> Result<i64, CounterDrift> {
    let delta = event.delta();
    match current.checked_add(delta) {
        Some(next) if next >= 0 => Ok(next),
        _ => Err(CounterDrift { current, delta }),
    }
}

impl PostCounters {
    /// Counters after a comment event; `has_comments` is derived from the
    /// adjusted count in the same step
    pub fn apply(self, event: CounterEvent) -> Result<Self, CounterDrift> {
        let comment_count = adjust(self.comment_count, event)?;
        Ok(Self::recount(comment_count))
    }

    /// Counters derived from an authoritative count of live comments
    pub fn recount(live_comments: i64) -> Self {
        Self {
            comment_count: live_comments,
            has_comments: live_comments > 0,
        }
    }
}

// ============================================================================
// Repair
// ============================================================================

/// Result of recounting one post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostRepair {
    pub post_id: PostId,
    pub before: PostCounters,
    pub after: PostCounters,
}

impl PostRepair {
    pub fn corrected(&self) -> bool {
        self.before != self.after
    }
}

/// Result of recounting one user's posts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRepair {
    pub user_id: UserId,
    pub before: i64,
    pub after: i64,
}

impl UserRepair {
    pub fn corrected(&self) -> bool {
        self.before != self.after
    }
}

/// Summary of a full reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct RepairReport {
    pub posts_checked: usize,
    pub users_checked: usize,
    pub posts_corrected: Vec<PostRepair>,
    pub users_corrected: Vec<UserRepair>,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self.posts_corrected.is_empty() && self.users_corrected.is_empty()
    }
}
