use std::{cmp::Reverse, convert::Infallible, str::FromStr, sync::Arc};

use serde::Deserialize;

use super::Comment;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortType {
    MostUpvoted,
    // Insertion order
    #[default]
    Unsorted,
}

impl From<&str> for SortType {
    fn from(s: &str) -> Self {
        match s {
            "mostUpvoted" => SortType::MostUpvoted,
            _ => SortType::Unsorted,
        }
    }
}

impl FromStr for SortType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl<'de> Deserialize<'de> for SortType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(String::deserialize(deserializer)?.as_str().into())
    }
}

/// Returns a new top-level ordering. Replies keep their insertion order.
pub fn sort_top_level(comments: &[Arc<Comment>], sort: SortType) -> Vec<Arc<Comment>> {
    let mut sorted = comments.to_vec();

    match sort {
        // `sort_by_key` is stable, so ties keep their original order
        SortType::MostUpvoted => sorted.sort_by_key(|c| Reverse(c.upvotes)),
        SortType::Unsorted => {}
    }

    sorted
}
