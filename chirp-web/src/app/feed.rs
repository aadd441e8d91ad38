//! Feed view models

use libchirp::PostWithAuthor;

/// Shown in place of the list when a feed query fails
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data...";

/// Which posts a feed shows
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeedScope {
    All,
    /// Posts by one user id
    Author(String),
}

impl FeedScope {
    /// Text shown when the feed has no posts
    pub fn empty_message(&self) -> &'static str {
        match self {
            FeedScope::All => "No posts yet",
            FeedScope::Author(_) => "User has not posted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    /// Data has not arrived yet
    Loading,
    Empty,
    Error(String),
    /// Items in source order
    Populated(Vec<PostWithAuthor>),
}

impl FeedState {
    pub fn from_items(items: Vec<PostWithAuthor>) -> Self {
        if items.is_empty() {
            FeedState::Empty
        } else {
            FeedState::Populated(items)
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FeedState::Loading)
    }
}
