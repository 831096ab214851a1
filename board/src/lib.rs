//! A comment board with nested replies and votes.
//!
//! [`store::CommentStore`] owns the comment forest and is the entry point for
//! hosts. Updates go through the persistent tree functions in
//! [`comment::tree`], and every change is handed to a background writer that
//! keeps the configured [`storage::Storage`] in sync.

pub mod comment;
pub mod config;
pub mod error;
pub mod id;
pub mod storage;
pub mod store;
pub mod telemetry;

pub use comment::{Comment, Forest, sort::SortType};
pub use store::CommentStore;
