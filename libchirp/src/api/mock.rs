//! In-memory implementation of the RPC boundary
//!
//! `MockApi` keeps users and posts in memory and can be told to fail or to
//! stall, so view-layer tests can exercise loading, error and double-submit
//! paths without a database.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::api::{PostsApi, ProfileApi};
use crate::error::{ApiError, Result, ValidationError};
use crate::projection::filter_user_for_client;
use crate::types::{Author, Post, PostWithAuthor, User};

/// Failure returned by `create`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFailure {
    /// Validation error with this message on `content`
    Validation(String),
    /// Rate-limit error with this message on `content`
    RateLimited(String),
    /// Unstructured server error
    Internal(String),
}

impl MockFailure {
    fn to_error(&self) -> ApiError {
        match self {
            MockFailure::Validation(msg) => {
                ApiError::Validation(ValidationError::field("content", msg.clone()))
            }
            MockFailure::RateLimited(msg) => {
                ApiError::RateLimited(ValidationError::field("content", msg.clone()))
            }
            MockFailure::Internal(msg) => ApiError::Internal(msg.clone()),
        }
    }
}

/// Configuration for mock behavior
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Error to return from `create`, if any
    pub create_failure: Option<MockFailure>,

    /// Whether feed queries fail
    pub fetch_fails: bool,

    /// Delay before completing any call
    pub delay: Duration,

    /// Number of times `create` has been called
    pub create_calls: Arc<Mutex<usize>>,

    /// Number of feed queries (`get_all`, `get_posts_by_user_id`)
    pub fetch_calls: Arc<Mutex<usize>>,
}

#[derive(Default)]
pub struct MockApi {
    config: MockConfig,
    users: Mutex<Vec<User>>,
    /// Newest first
    posts: Mutex<Vec<Post>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockApi {
    pub fn new(config: MockConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// A mock whose calls all succeed immediately
    pub fn success() -> Self {
        Self::default()
    }

    /// A mock whose `create` always fails with `failure`
    pub fn create_failure(failure: MockFailure) -> Self {
        Self::new(MockConfig {
            create_failure: Some(failure),
            ..Default::default()
        })
    }

    /// A mock whose feed queries always fail
    pub fn fetch_failure() -> Self {
        Self::new(MockConfig {
            fetch_fails: true,
            ..Default::default()
        })
    }

    /// A mock that sleeps for `delay` in every call
    pub fn with_delay(delay: Duration) -> Self {
        Self::new(MockConfig {
            delay,
            ..Default::default()
        })
    }

    /// Register a user
    pub fn with_user(self, user: User) -> Self {
        lock(&self.users).push(user);
        self
    }

    /// Seed a post. Posts are kept newest first regardless of insertion order.
    pub fn with_post(self, post: Post) -> Self {
        {
            let mut posts = lock(&self.posts);
            posts.push(post);
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        }
        self
    }

    pub fn create_calls(&self) -> usize {
        *lock(&self.config.create_calls)
    }

    pub fn fetch_calls(&self) -> usize {
        *lock(&self.config.fetch_calls)
    }

    /// Content of every post, newest first
    pub fn posted_content(&self) -> Vec<String> {
        lock(&self.posts).iter().map(|p| p.content.clone()).collect()
    }

    async fn simulate_latency(&self) {
        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }
    }

    fn author_of(&self, post: &Post) -> Result<Author> {
        lock(&self.users)
            .iter()
            .find(|u| u.id == post.author_id)
            .map(filter_user_for_client)
            .ok_or_else(|| ApiError::Internal("Author for post not found".to_string()).into())
    }

    async fn feed<F>(&self, include: F) -> Result<Vec<PostWithAuthor>>
    where
        F: Fn(&Post) -> bool + Send,
    {
        *lock(&self.config.fetch_calls) += 1;
        self.simulate_latency().await;

        if self.config.fetch_fails {
            return Err(ApiError::Internal("Mock fetch failed".to_string()).into());
        }

        let posts: Vec<Post> = lock(&self.posts).iter().filter(|p| include(p)).cloned().collect();
        posts
            .into_iter()
            .map(|post| -> Result<PostWithAuthor> {
                let author = self.author_of(&post)?;
                Ok(PostWithAuthor { post, author })
            })
            .collect()
    }
}

#[async_trait]
impl PostsApi for MockApi {
    async fn get_all(&self) -> Result<Vec<PostWithAuthor>> {
        self.feed(|_| true).await
    }

    async fn get_posts_by_user_id(&self, user_id: &str) -> Result<Vec<PostWithAuthor>> {
        let user_id = user_id.to_string();
        self.feed(move |p| p.author_id == user_id).await
    }

    async fn get_by_id(&self, post_id: &str) -> Result<Option<PostWithAuthor>> {
        self.simulate_latency().await;

        let post = lock(&self.posts).iter().find(|p| p.id == post_id).cloned();
        match post {
            Some(post) => {
                let author = self.author_of(&post)?;
                Ok(Some(PostWithAuthor { post, author }))
            }
            None => Ok(None),
        }
    }

    async fn create(&self, author_id: &str, content: &str) -> Result<Post> {
        *lock(&self.config.create_calls) += 1;
        self.simulate_latency().await;

        if let Some(failure) = &self.config.create_failure {
            return Err(failure.to_error().into());
        }

        let post = Post::new(author_id.to_string(), content.to_string());
        lock(&self.posts).insert(0, post.clone());
        Ok(post)
    }
}

#[async_trait]
impl ProfileApi for MockApi {
    async fn get_user_by_username(&self, username: &str) -> Result<Option<Author>> {
        self.simulate_latency().await;
        Ok(lock(&self.users)
            .iter()
            .find(|u| u.username == username)
            .map(filter_user_for_client))
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<Option<Author>> {
        self.simulate_latency().await;
        Ok(lock(&self.users)
            .iter()
            .find(|u| u.id == user_id)
            .map(filter_user_for_client))
    }
}
