//! Rate limiting for post creation
//!
//! Counts posts per author in fixed windows of `window_secs`.

use crate::config::RateLimitConfig;
use crate::error::{DbError, Result};
use crate::Database;

pub struct RateLimiter {
    max_posts: u32,
    window_secs: i64,
}

impl RateLimiter {
    pub fn new(max_posts: u32, window_secs: u64) -> Self {
        Self {
            max_posts,
            window_secs: window_secs.max(1) as i64,
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_posts, config.window_secs)
    }

    /// Atomically check the author's window and count this post
    ///
    /// Returns Ok(true) if the post is allowed, Ok(false) if rate limited.
    /// A denied attempt is not counted.
    pub async fn check_and_record(&self, db: &Database, author_id: &str, now: i64) -> Result<bool> {
        if self.max_posts == 0 {
            return Ok(false);
        }

        let window_start = self.window_start(now);

        // The conditional upsert only returns a row when the counter moved.
        let row = sqlx::query_as::<_, (i64,)>(
            r#"
            INSERT INTO rate_limits (author_id, window_start, post_count)
            VALUES (?, ?, 1)
            ON CONFLICT(author_id, window_start)
            DO UPDATE SET post_count = post_count + 1
            WHERE post_count < ?
            RETURNING post_count
            "#,
        )
        .bind(author_id)
        .bind(window_start)
        .bind(i64::from(self.max_posts))
        .fetch_optional(db.pool())
        .await
        .map_err(DbError::SqlxError)?;

        Ok(row.is_some())
    }

    /// Delete windows that started before `cutoff`
    pub async fn cleanup_old_windows(&self, db: &Database, cutoff: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM rate_limits
            WHERE window_start < ?
            "#,
        )
        .bind(self.window_start(cutoff))
        .execute(db.pool())
        .await
        .map_err(DbError::SqlxError)?;

        Ok(result.rows_affected())
    }

    /// User-facing explanation of the limit, e.g. "You can only post 1 time every 1 minute"
    pub fn limit_message(&self) -> String {
        let times = if self.max_posts == 1 { "time" } else { "times" };
        format!(
            "You can only post {} {} every {}",
            self.max_posts,
            times,
            describe_window(self.window_secs)
        )
    }

    fn window_start(&self, timestamp: i64) -> i64 {
        timestamp.div_euclid(self.window_secs) * self.window_secs
    }
}

fn describe_window(secs: i64) -> String {
    let (amount, unit) = if secs % 3600 == 0 {
        (secs / 3600, "hour")
    } else if secs % 60 == 0 {
        (secs / 60, "minute")
    } else {
        (secs, "second")
    };
    let plural = if amount == 1 { "" } else { "s" };
    format!("{} {}{}", amount, unit, plural)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup_test_db() -> (TempDir, Database) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = Database::new(&db_path.to_string_lossy()).await.unwrap();
        (temp_dir, db)
    }

    async fn get_window_count(db: &Database, author_id: &str, window_start: i64) -> i64 {
        let row = sqlx::query_as::<_, (i64,)>(
            "SELECT post_count FROM rate_limits WHERE author_id = ? AND window_start = ?",
        )
        .bind(author_id)
        .bind(window_start)
        .fetch_optional(db.pool())
        .await
        .unwrap();
        row.map(|r| r.0).unwrap_or(0)
    }

    #[tokio::test]
    async fn test_allows_first_post() {
        let (_temp, db) = setup_test_db().await;
        let limiter = RateLimiter::new(1, 60);

        let allowed = limiter.check_and_record(&db, "user_1", 1_000_020).await.unwrap();
        assert!(allowed, "First post should be allowed");
    }

    #[tokio::test]
    async fn test_blocks_posts_over_limit() {
        let (_temp, db) = setup_test_db().await;
        let limiter = RateLimiter::new(3, 60);
        let now = 1_000_020;

        for i in 0..3 {
            let allowed = limiter.check_and_record(&db, "user_1", now).await.unwrap();
            assert!(allowed, "Post {} should be allowed (under limit)", i + 1);
        }

        let allowed = limiter.check_and_record(&db, "user_1", now).await.unwrap();
        assert!(!allowed, "Post 4 should be blocked (over limit)");
    }

    #[tokio::test]
    async fn test_next_window_resets() {
        let (_temp, db) = setup_test_db().await;
        let limiter = RateLimiter::new(1, 60);
        let window1 = 1_000_020;

        assert!(limiter.check_and_record(&db, "user_1", window1).await.unwrap());
        assert!(!limiter.check_and_record(&db, "user_1", window1 + 30).await.unwrap());

        let window2 = window1 + 60;
        assert!(
            limiter.check_and_record(&db, "user_1", window2).await.unwrap(),
            "Should be allowed in new window"
        );
    }

    #[tokio::test]
    async fn test_independent_authors() {
        let (_temp, db) = setup_test_db().await;
        let limiter = RateLimiter::new(1, 60);
        let now = 1_000_020;

        assert!(limiter.check_and_record(&db, "user_1", now).await.unwrap());
        assert!(
            limiter.check_and_record(&db, "user_2", now).await.unwrap(),
            "user_2 should be independent of user_1's limit"
        );
    }

    #[tokio::test]
    async fn test_denied_attempt_is_not_counted() {
        let (_temp, db) = setup_test_db().await;
        let limiter = RateLimiter::new(2, 60);
        let now = 1_000_020;

        assert!(limiter.check_and_record(&db, "user_1", now).await.unwrap());
        assert!(limiter.check_and_record(&db, "user_1", now).await.unwrap());
        assert!(!limiter.check_and_record(&db, "user_1", now).await.unwrap());

        let count = get_window_count(&db, "user_1", limiter.window_start(now)).await;
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_cleanup_old_windows() {
        let (_temp, db) = setup_test_db().await;
        let limiter = RateLimiter::new(1, 60);

        let old_time = 1_000_020;
        let current_time = old_time + 600;
        limiter.check_and_record(&db, "user_1", old_time).await.unwrap();
        limiter.check_and_record(&db, "user_1", current_time).await.unwrap();

        let removed = limiter
            .cleanup_old_windows(&db, current_time - 60)
            .await
            .unwrap();
        assert_eq!(removed, 1);
    }

    #[tokio::test]
    async fn test_zero_limit_blocks_everything() {
        let (_temp, db) = setup_test_db().await;
        let limiter = RateLimiter::new(0, 60);
        assert!(!limiter.check_and_record(&db, "user_1", 1_000_020).await.unwrap());
    }

    #[test]
    fn test_limit_message_defaults() {
        let limiter = RateLimiter::new(1, 60);
        assert_eq!(limiter.limit_message(), "You can only post 1 time every 1 minute");
    }

    #[test]
    fn test_limit_message_plurals() {
        assert_eq!(
            RateLimiter::new(3, 120).limit_message(),
            "You can only post 3 times every 2 minutes"
        );
        assert_eq!(
            RateLimiter::new(5, 3600).limit_message(),
            "You can only post 5 times every 1 hour"
        );
        assert_eq!(
            RateLimiter::new(2, 45).limit_message(),
            "You can only post 2 times every 45 seconds"
        );
    }
}
