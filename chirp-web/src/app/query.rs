//! Feed query cache
//!
//! Wraps feed queries in a `moka` cache keyed by [`FeedScope`]. Concurrent
//! requests for the same scope share one backend call. The call runs in its
//! own task, so a render that stops waiting still leaves the result to land
//! in the cache for the next request.
//!
//! Invalidation bumps a generation counter. A load that began in an older
//! generation drops the entry it inserted, so a fetch racing a create never
//! leaves the pre-create list behind.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::task::JoinHandle;

use libchirp::{PostWithAuthor, PostsApi};

use super::feed::{FeedScope, FeedState, FETCH_ERROR_MESSAGE};

const QUERY_CACHE_CAPACITY: u64 = 10_000;

#[derive(Clone)]
pub struct QueryCache {
    feeds: Cache<FeedScope, Arc<Vec<PostWithAuthor>>>,
    generation: Arc<AtomicU64>,
    wait: Duration,
}

impl QueryCache {
    /// `ttl` bounds how stale a cached feed may get; `wait` is how long a
    /// render waits before reporting [`FeedState::Loading`].
    pub fn new(ttl: Duration, wait: Duration) -> Self {
        let feeds = Cache::builder()
            .max_capacity(QUERY_CACHE_CAPACITY)
            .time_to_live(ttl)
            .build();

        Self {
            feeds,
            generation: Arc::new(AtomicU64::new(0)),
            wait,
        }
    }

    /// Current state of the feed for `scope`
    pub async fn feed(&self, posts: Arc<dyn PostsApi>, scope: FeedScope) -> FeedState {
        let handle = self.spawn_load(posts, scope.clone());

        match tokio::time::timeout(self.wait, handle).await {
            Err(_) => {
                tracing::debug!(?scope, "feed still loading");
                FeedState::Loading
            }
            Ok(Err(join_error)) => {
                tracing::error!(?scope, error = %join_error, "feed task failed");
                FeedState::Error(FETCH_ERROR_MESSAGE.to_string())
            }
            Ok(Ok(Err(error))) => {
                tracing::warn!(?scope, error = %error, "feed query failed");
                FeedState::Error(FETCH_ERROR_MESSAGE.to_string())
            }
            Ok(Ok(Ok(items))) => FeedState::from_items(items.as_ref().clone()),
        }
    }

    /// Start loading `scope` without waiting for it
    pub fn prefetch(&self, posts: Arc<dyn PostsApi>, scope: FeedScope) {
        self.spawn_load(posts, scope);
    }

    /// Drop every cached feed; the next read refetches
    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.feeds.invalidate_all();
        tracing::debug!("feed cache invalidated");
    }

    /// Run the query for `scope` in its own task. Errors are not cached.
    fn spawn_load(
        &self,
        posts: Arc<dyn PostsApi>,
        scope: FeedScope,
    ) -> JoinHandle<Result<Arc<Vec<PostWithAuthor>>, Arc<libchirp::ChirpError>>> {
        let feeds = self.feeds.clone();
        let generation = Arc::clone(&self.generation);
        let started = generation.load(Ordering::SeqCst);

        tokio::spawn(async move {
            let fetch_scope = scope.clone();
            let result = feeds
                .try_get_with(scope.clone(), async move {
                    let items = match &fetch_scope {
                        FeedScope::All => posts.get_all().await?,
                        FeedScope::Author(user_id) => posts.get_posts_by_user_id(user_id).await?,
                    };
                    Ok::<_, libchirp::ChirpError>(Arc::new(items))
                })
                .await;

            if generation.load(Ordering::SeqCst) != started {
                tracing::debug!(?scope, "dropping feed loaded before invalidation");
                feeds.invalidate(&scope).await;
            }

            result
        })
    }
}
