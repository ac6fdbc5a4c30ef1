//! Forum threads and replies.
//!
//! Anyone may read. Posting needs an account; deleting needs to be the
//! author or an admin.

mod replies;
mod threads;

pub use replies::{DeleteReplyCommand, DeleteReplyHandler, ReplyCommand, ReplyHandler};
pub use threads::{
    CreateThreadCommand, CreateThreadHandler, DeleteThreadCommand, DeleteThreadHandler,
    GetThreadHandler, ListThreadsHandler,
};

use crate::domain::forum::ForumThread;
use crate::domain::foundation::{DomainError, ErrorCode, ThreadId};
use crate::ports::ForumRepository;

pub(crate) async fn load_thread(
    forum: &dyn ForumRepository,
    id: &ThreadId,
) -> Result<ForumThread, DomainError> {
    forum
        .find_thread(id)
        .await?
        .ok_or_else(|| DomainError::not_found(ErrorCode::ThreadNotFound, "Thread not found"))
}
