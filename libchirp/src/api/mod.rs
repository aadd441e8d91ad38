//! Typed RPC boundary between the view layer and the backend
//!
//! The web front end only ever talks to these two traits. [`crate::service::ChirpService`]
//! implements them over SQLite; [`mock::MockApi`] implements them in memory.
//!
//! # Example
//!
//! ```no_run
//! use libchirp::api::PostsApi;
//! use libchirp::service::ChirpService;
//!
//! # async fn example() -> libchirp::Result<()> {
//! let service = ChirpService::new().await?;
//!
//! for item in service.get_all().await? {
//!     println!("@{}: {}", item.author.username, item.post.content);
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Author, Post, PostWithAuthor};

// Available for all builds so downstream crates can drive their tests with it
pub mod mock;

/// Post queries and the create mutation
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// Global feed, newest first
    async fn get_all(&self) -> Result<Vec<PostWithAuthor>>;

    /// One author's posts, newest first
    async fn get_posts_by_user_id(&self, user_id: &str) -> Result<Vec<PostWithAuthor>>;

    async fn get_by_id(&self, post_id: &str) -> Result<Option<PostWithAuthor>>;

    /// Create a post for `author_id`
    ///
    /// # Errors
    ///
    /// - `ApiError::Validation` when the content is rejected, with a `content` field error
    /// - `ApiError::RateLimited` when the author posted too recently, with a `content` field error
    async fn create(&self, author_id: &str, content: &str) -> Result<Post>;
}

/// Public user lookups. Results are always projected to [`Author`].
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn get_user_by_username(&self, username: &str) -> Result<Option<Author>>;

    async fn get_user_by_id(&self, user_id: &str) -> Result<Option<Author>>;
}
