//! Service layer for Chirp
//!
//! The reference backend behind the RPC boundary. `ChirpService` is the
//! facade; it owns the shared `Database` and `Config` and hands them to the
//! sub-services:
//!
//! - `PostService`: feed queries and post creation
//! - `ProfileService`: public user lookups
//! - `ValidationService`: content checks
//!
//! `ChirpService` implements [`PostsApi`] and [`ProfileApi`] by delegating to
//! those sub-services.
//!
//! # Example
//!
//! ```no_run
//! use libchirp::service::ChirpService;
//!
//! # async fn example() -> libchirp::Result<()> {
//! let service = ChirpService::new().await?;
//!
//! let post = service.posts().create("user_2abc", "🐦🐦🐦").await?;
//! println!("Created post {}", post.id);
//! # Ok(())
//! # }
//! ```

pub mod posts;
pub mod profile;
pub mod validation;

use async_trait::async_trait;
use std::sync::Arc;

use self::posts::PostService;
use self::profile::ProfileService;
use self::validation::ValidationService;
use crate::api::{PostsApi, ProfileApi};
use crate::error::ConfigError;
use crate::types::{Author, Post, PostWithAuthor};
use crate::{Config, Database, Result};

/// Main service facade
///
/// All sub-services share the same `Arc<Database>` and `Arc<Config>`.
#[derive(Clone)]
pub struct ChirpService {
    db: Arc<Database>,
    config: Arc<Config>,
    posts: PostService,
    profile: ProfileService,
    validation: ValidationService,
}

impl ChirpService {
    /// Create a service from the configuration at the default location
    pub async fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::from_config(config).await
    }

    /// Create a service with a custom configuration
    ///
    /// # Errors
    ///
    /// Fails if the database path is unusable or migrations fail.
    pub async fn from_config(config: Config) -> Result<Self> {
        let db_path = crate::config::resolve_db_path(&config.database.path)?;
        let db_path_str = db_path
            .to_str()
            .ok_or_else(|| ConfigError::MissingField("Invalid database path".to_string()))?;
        let db = Database::new(db_path_str).await?;

        Ok(Self::from_parts(db, config))
    }

    /// Build a service over an already opened database
    pub fn from_parts(db: Database, config: Config) -> Self {
        let db = Arc::new(db);
        let config = Arc::new(config);

        let validation = ValidationService::new(Arc::clone(&config));
        let posts = PostService::new(Arc::clone(&db), Arc::clone(&config), validation.clone());
        let profile = ProfileService::new(Arc::clone(&db));

        Self {
            db,
            config,
            posts,
            profile,
            validation,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn posts(&self) -> &PostService {
        &self.posts
    }

    pub fn profile(&self) -> &ProfileService {
        &self.profile
    }

    pub fn validation(&self) -> &ValidationService {
        &self.validation
    }
}

#[async_trait]
impl PostsApi for ChirpService {
    async fn get_all(&self) -> Result<Vec<PostWithAuthor>> {
        self.posts.get_all().await
    }

    async fn get_posts_by_user_id(&self, user_id: &str) -> Result<Vec<PostWithAuthor>> {
        self.posts.get_posts_by_user_id(user_id).await
    }

    async fn get_by_id(&self, post_id: &str) -> Result<Option<PostWithAuthor>> {
        self.posts.get_by_id(post_id).await
    }

    async fn create(&self, author_id: &str, content: &str) -> Result<Post> {
        self.posts.create(author_id, content).await
    }
}

#[async_trait]
impl ProfileApi for ChirpService {
    async fn get_user_by_username(&self, username: &str) -> Result<Option<Author>> {
        self.profile.get_user_by_username(username).await
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<Option<Author>> {
        self.profile.get_user_by_id(user_id).await
    }
}
