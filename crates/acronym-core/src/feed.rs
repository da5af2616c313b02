use crate::error::FeedError;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub body: String,
    /// `None` when the author was deleted or the comment removed.
    pub author: Option<String>,
}

impl Comment {
    pub fn new(id: impl Into<String>, body: impl Into<String>, author: Option<&str>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
            author: author.map(str::to_string),
        }
    }
}

// ---------------------------------------------------------------------------
// Feed
// ---------------------------------------------------------------------------

/// A discussion feed the bot reads comments from and replies to.
///
/// All calls block. Implementations do no retrying of their own.
pub trait Feed {
    /// The account name the bot posts as.
    fn bot_identity(&self) -> Result<String, FeedError>;

    /// Up to `limit` recent comments in the order the feed yields them.
    fn recent_comments(&self, limit: usize) -> Result<Vec<Comment>, FeedError>;

    /// Post `body` as a reply to the comment with id `comment_id`.
    fn reply(&self, comment_id: &str, body: &str) -> Result<(), FeedError>;
}

impl<F: Feed + ?Sized> Feed for &F {
    fn bot_identity(&self) -> Result<String, FeedError> {
        (**self).bot_identity()
    }

    fn recent_comments(&self, limit: usize) -> Result<Vec<Comment>, FeedError> {
        (**self).recent_comments(limit)
    }

    fn reply(&self, comment_id: &str, body: &str) -> Result<(), FeedError> {
        (**self).reply(comment_id, body)
    }
}
