//! Persistent updates over a comment forest.
//!
//! Every function here takes the forest by shared reference and never
//! mutates it. An update rebuilds only the nodes on the path from the root to
//! the matched comment; all other nodes are the same `Arc` as in the input.

use std::sync::Arc;

use super::{Change, Comment, Forest};

/// Finds the first comment with `id` in depth-first order and replaces it
/// with the result of `transform`. A forest without such a comment comes back
/// unchanged.
pub fn apply_by_id<F>(forest: &[Arc<Comment>], id: &str, transform: F) -> Forest
where
    F: FnOnce(&Comment) -> Change,
{
    try_apply_by_id(forest, id, transform).unwrap_or_else(|| forest.to_vec())
}

/// Same as [`apply_by_id`] but returns `None` when no comment matched.
pub fn try_apply_by_id<F>(forest: &[Arc<Comment>], id: &str, transform: F) -> Option<Forest>
where
    F: FnOnce(&Comment) -> Change,
{
    apply_in(forest, id, transform).ok()
}

// Hands the transform back on a miss so the next sibling can use it. A node
// that matches is never searched inside.
fn apply_in<F>(comments: &[Arc<Comment>], id: &str, mut transform: F) -> Result<Forest, F>
where
    F: FnOnce(&Comment) -> Change,
{
    for (i, comment) in comments.iter().enumerate() {
        if comment.id == id {
            let updated = transform(comment.as_ref()).apply(comment);
            return Ok(replace_at(comments, i, updated));
        }

        if comment.replies.is_empty() {
            continue;
        }

        match apply_in(&comment.replies, id, transform) {
            Ok(replies) => {
                let updated = Comment {
                    id: comment.id.clone(),
                    content: comment.content.clone(),
                    upvotes: comment.upvotes,
                    downvotes: comment.downvotes,
                    replies,
                };
                return Ok(replace_at(comments, i, updated));
            }
            Err(t) => transform = t,
        }
    }

    Err(transform)
}

fn replace_at(comments: &[Arc<Comment>], index: usize, comment: Comment) -> Forest {
    let mut rebuilt = comments.to_vec();
    rebuilt[index] = Arc::new(comment);
    rebuilt
}

/// Depth-first lookup, same order and first-match policy as [`apply_by_id`].
pub fn find_by_id<'a>(forest: &'a [Arc<Comment>], id: &str) -> Option<&'a Arc<Comment>> {
    for comment in forest {
        if comment.id == id {
            return Some(comment);
        }
        if let Some(found) = find_by_id(&comment.replies, id) {
            return Some(found);
        }
    }
    None
}

/// Iterates every comment depth-first, yielding its depth (0 for top level).
pub fn walk(forest: &[Arc<Comment>]) -> Walk<'_> {
    Walk {
        stack: forest.iter().rev().map(|c| (0, c.as_ref())).collect(),
    }
}

pub struct Walk<'a> {
    stack: Vec<(usize, &'a Comment)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Comment);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, comment) = self.stack.pop()?;
        self.stack
            .extend(comment.replies.iter().rev().map(|r| (depth + 1, r.as_ref())));
        Some((depth, comment))
    }
}
