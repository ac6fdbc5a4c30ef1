//! HTTP DTOs for forum endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::forum::ForumThread;
use crate::domain::foundation::Page;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateThreadRequest {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReplyRequest {
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadListResponse {
    pub items: Vec<ForumThread>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

impl From<Page<ForumThread>> for ThreadListResponse {
    fn from(page: Page<ForumThread>) -> Self {
        let seen = u64::from(page.page.saturating_sub(1)) * u64::from(page.limit)
            + page.items.len() as u64;
        Self {
            has_more: seen < page.total,
            items: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PageRequest, UserId};

    #[test]
    fn has_more_reflects_remaining_threads() {
        let thread = ForumThread::new(UserId::new(), "Verb tenses", "Which one?").unwrap();
        let request = PageRequest::new(Some(1), Some(1)).unwrap();

        let first: ThreadListResponse = Page::new(vec![thread.clone()], 2, request).into();
        assert!(first.has_more);

        let last_request = PageRequest::new(Some(2), Some(1)).unwrap();
        let last: ThreadListResponse = Page::new(vec![thread], 2, last_request).into();
        assert!(!last.has_more);
    }
}
