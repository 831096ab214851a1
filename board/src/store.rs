use std::sync::Arc;

use crate::{
    comment::{
        Change, Comment, CommentPatch, Forest,
        sort::{SortType, sort_top_level},
        tree,
    },
    error::StorageError,
    id::{IdSource, UuidSource},
    storage::{PersistenceQueue, Storage},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vote {
    Up,
    Down,
}

/// Owns the comment forest. Every mutating operation replaces the forest with
/// an updated copy and queues it for saving without waiting on the write.
pub struct CommentStore {
    comments: Forest,
    ids: Box<dyn IdSource>,
    persistence: Option<PersistenceQueue>,
}

impl CommentStore {
    /// An empty store that saves to `storage`. The writer task runs on the
    /// current Tokio runtime; without one the store keeps nothing between
    /// sessions.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let persistence = match PersistenceQueue::spawn(storage) {
            Ok(queue) => Some(queue),
            Err(error) => {
                tracing::warn!(%error, "Comments will not be saved");
                None
            }
        };

        Self {
            comments: vec![],
            ids: Box::new(UuidSource),
            persistence,
        }
    }

    /// An empty store that keeps nothing between sessions.
    pub fn detached() -> Self {
        Self {
            comments: vec![],
            ids: Box::new(UuidSource),
            persistence: None,
        }
    }

    /// Loads whatever `storage` holds and keeps saving to it.
    pub async fn open(storage: Arc<dyn Storage>) -> Self {
        let mut store = Self::new(storage.clone());
        store.restore(storage.as_ref()).await;
        store
    }

    pub fn with_id_source(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Replaces the forest with the saved one. A failed load counts as
    /// nothing saved. Returns whether a saved forest was found.
    pub async fn restore(&mut self, storage: &dyn Storage) -> bool {
        match storage.load().await {
            Ok(Some(comments)) => {
                tracing::info!(top_level = comments.len(), "Restored comments");
                self.replace_all(comments);
                true
            }
            Ok(None) => false,
            Err(error) => {
                tracing::warn!(%error, "Failed to load saved comments, starting empty");
                false
            }
        }
    }

    pub fn comments(&self) -> &[Arc<Comment>] {
        &self.comments
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Comment>> {
        tree::find_by_id(&self.comments, id)
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Appends a new top-level comment and returns its id.
    pub fn add_comment(&mut self, content: impl Into<String>) -> String {
        let id = self.ids.new_id();
        self.comments.push(Arc::new(Comment::new(id.clone(), content)));
        tracing::debug!(%id, "Added comment");
        self.persist();
        id
    }

    /// Appends a reply to the comment `target_id` at any depth. When there is
    /// no such comment the reply is dropped and `None` is returned.
    pub fn add_reply(&mut self, target_id: &str, content: impl Into<String>) -> Option<String> {
        let id = self.ids.new_id();
        let reply = Arc::new(Comment::new(id.clone(), content));

        let added = match tree::try_apply_by_id(&self.comments, target_id, |_| {
            Change::AppendReply(reply)
        }) {
            Some(comments) => {
                self.comments = comments;
                tracing::debug!(%id, reply_to = target_id, "Added reply");
                Some(id)
            }
            None => {
                tracing::debug!(target_id, "Reply target not found, discarding reply");
                None
            }
        };

        self.persist();
        added
    }

    /// Returns whether a comment was found and updated.
    pub fn upvote(&mut self, target_id: &str) -> bool {
        self.vote(target_id, Vote::Up)
    }

    /// Returns whether a comment was found and updated.
    pub fn downvote(&mut self, target_id: &str) -> bool {
        self.vote(target_id, Vote::Down)
    }

    fn vote(&mut self, target_id: &str, vote: Vote) -> bool {
        let updated = tree::try_apply_by_id(&self.comments, target_id, |comment| {
            Change::Patch(match vote {
                Vote::Up => CommentPatch {
                    upvotes: Some(comment.upvotes + 1),
                    ..Default::default()
                },
                Vote::Down => CommentPatch {
                    downvotes: Some(comment.downvotes + 1),
                    ..Default::default()
                },
            })
        });

        let found = match updated {
            Some(comments) => {
                self.comments = comments;
                true
            }
            None => {
                tracing::debug!(target_id, ?vote, "Vote target not found");
                false
            }
        };

        self.persist();
        found
    }

    /// Swaps in a whole forest, e.g. one just loaded from storage. Not saved.
    pub fn replace_all(&mut self, comments: Forest) {
        self.comments = comments;
    }

    /// Top-level comments in presentation order. Replies are left as stored.
    pub fn list_sorted(&self, sort: SortType) -> Vec<Arc<Comment>> {
        sort_top_level(&self.comments, sort)
    }

    /// Waits until every change made so far has reached storage.
    pub async fn flush(&self) -> Result<(), StorageError> {
        match &self.persistence {
            Some(queue) => queue.flush().await,
            None => Ok(()),
        }
    }

    /// Flushes pending writes. Dropping the store then ends the writer.
    pub async fn shutdown(self) -> Result<(), StorageError> {
        self.flush().await
    }

    fn persist(&self) {
        if let Some(queue) = &self.persistence {
            queue.save(self.comments.clone());
        }
    }
}

impl Default for CommentStore {
    fn default() -> Self {
        Self::detached()
    }
}
