//! Post queries and creation
//!
//! Feed queries join each post with its author's public projection. Creation
//! runs validation, then the per-author rate limiter, then the insert.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::validation::{ValidationService, CONTENT_FIELD};
use crate::error::{ApiError, ValidationError};
use crate::projection::filter_user_for_client;
use crate::rate_limiter::RateLimiter;
use crate::types::{Author, Post, PostWithAuthor};
use crate::{Config, Database, Result};

#[derive(Clone)]
pub struct PostService {
    db: Arc<Database>,
    config: Arc<Config>,
    validation: ValidationService,
    rate_limiter: Arc<RateLimiter>,
}

impl PostService {
    pub fn new(db: Arc<Database>, config: Arc<Config>, validation: ValidationService) -> Self {
        let rate_limiter = Arc::new(RateLimiter::from_config(&config.rate_limit));
        Self {
            db,
            config,
            validation,
            rate_limiter,
        }
    }

    /// Newest posts across all authors, up to `posts.feed_limit`
    pub async fn get_all(&self) -> Result<Vec<PostWithAuthor>> {
        let posts = self.db.list_posts(self.config.posts.feed_limit).await?;
        self.attach_authors(posts).await
    }

    /// Newest posts by `user_id`, up to `posts.feed_limit`
    pub async fn get_posts_by_user_id(&self, user_id: &str) -> Result<Vec<PostWithAuthor>> {
        let posts = self
            .db
            .list_posts_by_author(user_id, self.config.posts.feed_limit)
            .await?;
        self.attach_authors(posts).await
    }

    pub async fn get_by_id(&self, post_id: &str) -> Result<Option<PostWithAuthor>> {
        let Some(post) = self.db.get_post(post_id).await? else {
            return Ok(None);
        };
        let mut items = self.attach_authors(vec![post]).await?;
        Ok(items.pop())
    }

    /// Validate, rate limit and store a new post
    ///
    /// Content is stored exactly as given.
    pub async fn create(&self, author_id: &str, content: &str) -> Result<Post> {
        if let Err(errors) = self.validation.validate(content) {
            info!(author_id = %author_id, "post rejected: {}", errors);
            return Err(ApiError::Validation(errors).into());
        }

        let now = Utc::now().timestamp();
        if !self
            .rate_limiter
            .check_and_record(&self.db, author_id, now)
            .await?
        {
            info!(author_id = %author_id, "post rejected: rate limited");
            return Err(ApiError::RateLimited(ValidationError::field(
                CONTENT_FIELD,
                self.rate_limiter.limit_message(),
            ))
            .into());
        }

        let post = Post::new(author_id.to_string(), content.to_string());
        self.db.create_post(&post).await?;
        info!(post_id = %post.id, author_id = %author_id, "post created");

        Ok(post)
    }

    /// Drop rate-limit windows that ended before `now`
    pub async fn prune_rate_limits(&self, now: i64) -> Result<u64> {
        let removed = self.rate_limiter.cleanup_old_windows(&self.db, now).await?;
        if removed > 0 {
            debug!(removed, "pruned rate limit windows");
        }
        Ok(removed)
    }

    /// Pair each post with its author, preserving order
    ///
    /// Authors are fetched in one batch. A post whose author is missing from
    /// the directory fails the whole query.
    async fn attach_authors(&self, posts: Vec<Post>) -> Result<Vec<PostWithAuthor>> {
        let mut author_ids: Vec<String> = posts.iter().map(|p| p.author_id.clone()).collect();
        author_ids.sort();
        author_ids.dedup();

        let authors: HashMap<String, Author> = self
            .db
            .get_users_by_ids(&author_ids)
            .await?
            .iter()
            .map(|user| (user.id.clone(), filter_user_for_client(user)))
            .collect();

        posts
            .into_iter()
            .map(|post| -> Result<PostWithAuthor> {
                let Some(author) = authors.get(&post.author_id).cloned() else {
                    warn!(post_id = %post.id, author_id = %post.author_id, "author for post not found");
                    return Err(ApiError::Internal("Author for post not found".to_string()).into());
                };
                Ok(PostWithAuthor { post, author })
            })
            .collect()
    }
}
