//! Application state shared across all request handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use libchirp::{Config, PostsApi, ProfileApi, Result};

use crate::app::{Composer, QueryCache};
use crate::session::SessionResolver;

/// Form instances expire after this long without a request and are never
/// evicted by count.
const COMPOSER_IDLE: Duration = Duration::from_secs(30 * 60);

#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostsApi>,
    pub profiles: Arc<dyn ProfileApi>,
    pub session: SessionResolver,
    pub queries: QueryCache,
    /// One create-post form per signed-in user id
    pub composers: Cache<String, Arc<Composer>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state over any backend implementing both halves of the RPC boundary
    pub fn new<A>(api: Arc<A>, config: Config) -> Result<Self>
    where
        A: PostsApi + ProfileApi + 'static,
    {
        let posts: Arc<dyn PostsApi> = api.clone();
        let profiles: Arc<dyn ProfileApi> = api;

        let session = SessionResolver::new(&config.auth.user_header, Arc::clone(&profiles))?;

        let queries = QueryCache::new(
            Duration::from_secs(config.web.query_ttl_secs),
            Duration::from_millis(config.web.feed_wait_ms),
        );

        let composers = Cache::builder().time_to_idle(COMPOSER_IDLE).build();

        tracing::info!(
            query_ttl_secs = config.web.query_ttl_secs,
            feed_wait_ms = config.web.feed_wait_ms,
            user_header = %config.auth.user_header,
            "application state initialized"
        );

        Ok(Self {
            posts,
            profiles,
            session,
            queries,
            composers,
            config: Arc::new(config),
        })
    }

    /// The create-post form for `user_id`, created on first use
    pub async fn composer_for(&self, user_id: &str) -> Arc<Composer> {
        self.composers
            .get_with(user_id.to_string(), async { Arc::new(Composer::new(user_id)) })
            .await
    }
}
