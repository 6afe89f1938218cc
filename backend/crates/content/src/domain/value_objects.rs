//! Value Objects
//!
//! Input validation for posts, comments and paging.

use crate::error::{ContentError, ContentResult};

/// Maximum title length in characters
pub const POST_TITLE_MAX_LENGTH: usize = 200;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Post title: non-blank, trimmed, at most [`POST_TITLE_MAX_LENGTH`] characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    pub fn new(raw: impl AsRef<str>) -> ContentResult<Self> {
        let title = raw.as_ref().trim();
        if title.is_empty() {
            return Err(ContentError::Validation("Title cannot be empty".into()));
        }
        let length = title.chars().count();
        if length > POST_TITLE_MAX_LENGTH {
            return Err(ContentError::Validation(format!(
                "Title must be at most {POST_TITLE_MAX_LENGTH} characters (got {length})"
            )));
        }
        Ok(Self(title.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Post body: any text that is not blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBody(String);

impl PostBody {
    pub fn new(raw: impl Into<String>) -> ContentResult<Self> {
        let body = raw.into();
        if body.trim().is_empty() {
            return Err(ContentError::Validation("Content cannot be empty".into()));
        }
        Ok(Self(body))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Comment body: any text that is not blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBody(String);

impl CommentBody {
    pub fn new(raw: impl Into<String>) -> ContentResult<Self> {
        let body = raw.into();
        if body.trim().is_empty() {
            return Err(ContentError::Validation(
                "Comment content cannot be empty".into(),
            ));
        }
        Ok(Self(body))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Offset/limit paging with lenient normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Page below 1 becomes 1; page size outside `1..=100` becomes 10
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = page
            .filter(|p| *p >= 1)
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or(1);
        let page_size = page_size
            .filter(|s| (1..=i64::from(MAX_PAGE_SIZE)).contains(s))
            .and_then(|s| u32::try_from(s).ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self { page, page_size }
    }

    /// Query-string form: text that is not an integer counts as absent
    pub fn parse(page: Option<&str>, page_size: Option<&str>) -> Self {
        let number = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<i64>().ok());
        Self::new(number(page), number(page_size))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}
