pub mod sort;
pub mod tree;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// The ordered top-level comments. Nodes sit behind `Arc` so an updated
/// forest can reuse every subtree that was not on the path to the change.
pub type Forest = Vec<Arc<Comment>>;

// The model that is kept in memory and written to storage
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub upvotes: u64,
    pub downvotes: u64,
    #[serde(default)]
    pub replies: Vec<Arc<Comment>>,
}

impl Comment {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            upvotes: 0,
            downvotes: 0,
            replies: vec![],
        }
    }

    /// Net votes, can go below zero. Saturates at the `i64` bounds.
    pub fn score(&self) -> i64 {
        let net = i128::from(self.upvotes) - i128::from(self.downvotes);
        net.clamp(i64::MIN.into(), i64::MAX.into()) as i64
    }

    /// Number of nodes below this comment, at all depths.
    pub fn reply_count(&self) -> usize {
        self.replies
            .iter()
            .map(|reply| 1 + reply.reply_count())
            .sum()
    }
}

/// Fields to overlay on a matched comment. `None` keeps the current value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CommentPatch {
    pub upvotes: Option<u64>,
    pub downvotes: Option<u64>,
}

/// What a transform wants done to the comment it matched.
#[derive(Debug, Clone)]
pub enum Change {
    Patch(CommentPatch),
    AppendReply(Arc<Comment>),
}

impl Change {
    // Builds the replacement node. Replies are shared unless appended to.
    fn apply(self, comment: &Comment) -> Comment {
        match self {
            Change::Patch(patch) => Comment {
                id: comment.id.clone(),
                content: comment.content.clone(),
                upvotes: patch.upvotes.unwrap_or(comment.upvotes),
                downvotes: patch.downvotes.unwrap_or(comment.downvotes),
                replies: comment.replies.clone(),
            },
            Change::AppendReply(reply) => {
                let mut replies = Vec::with_capacity(comment.replies.len() + 1);
                replies.extend(comment.replies.iter().cloned());
                replies.push(reply);
                Comment {
                    id: comment.id.clone(),
                    content: comment.content.clone(),
                    upvotes: comment.upvotes,
                    downvotes: comment.downvotes,
                    replies,
                }
            }
        }
    }
}
