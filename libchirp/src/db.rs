//! Database operations for Chirp

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use std::path::Path;

use crate::error::{DbError, Result};
use crate::types::{Post, User};

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database at `db_path` and run migrations
    pub async fn new(db_path: &str) -> Result<Self> {
        let expanded_path = shellexpand::tilde(db_path).to_string();
        let path = Path::new(&expanded_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(DbError::IoError)?;
        }

        // mode=rwc creates the file on first use
        let db_url = format!("sqlite://{}?mode=rwc", expanded_path.replace('\\', "/"));

        let pool = SqlitePool::connect(&db_url)
            .await
            .map_err(DbError::SqlxError)?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(DbError::MigrationError)?;

        tracing::debug!(path = %expanded_path, "database ready");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn create_post(&self, post: &Post) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, content, author_id, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&post.id)
        .bind(&post.content)
        .bind(&post.author_id)
        .bind(post.created_at.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(DbError::SqlxError)?;

        Ok(())
    }

    pub async fn get_post(&self, post_id: &str) -> Result<Option<Post>> {
        let row = sqlx::query(
            r#"
            SELECT id, content, author_id, created_at
            FROM posts WHERE id = ?
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::SqlxError)?;

        Ok(row.as_ref().map(post_from_row))
    }

    /// Newest posts first
    pub async fn list_posts(&self, limit: u32) -> Result<Vec<Post>> {
        let rows = sqlx::query(
            r#"
            SELECT id, content, author_id, created_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::SqlxError)?;

        Ok(rows.iter().map(post_from_row).collect())
    }

    /// Newest posts by one author first
    pub async fn list_posts_by_author(&self, author_id: &str, limit: u32) -> Result<Vec<Post>> {
        let rows = sqlx::query(
            r#"
            SELECT id, content, author_id, created_at
            FROM posts
            WHERE author_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(author_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::SqlxError)?;

        Ok(rows.iter().map(post_from_row).collect())
    }

    /// Insert a user, or replace every field of an existing one with the same id
    pub async fn upsert_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, profile_image_url, email_address,
                               first_name, last_name, private_metadata, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                username = excluded.username,
                profile_image_url = excluded.profile_image_url,
                email_address = excluded.email_address,
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                private_metadata = excluded.private_metadata
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.profile_image_url)
        .bind(&user.email_address)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.private_metadata)
        .bind(user.created_at.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(DbError::SqlxError)?;

        Ok(())
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", USER_SELECT))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::SqlxError)?;

        Ok(row.as_ref().map(user_from_row))
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!("{} WHERE username = ?", USER_SELECT))
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::SqlxError)?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Fetch every user whose id is in `user_ids`; unknown ids are skipped
    pub async fn get_users_by_ids(&self, user_ids: &[String]) -> Result<Vec<User>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; user_ids.len()].join(", ");
        let query_str = format!("{} WHERE id IN ({})", USER_SELECT, placeholders);

        let mut query = sqlx::query(&query_str);
        for id in user_ids {
            query = query.bind(id);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(DbError::SqlxError)?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(&format!("{} ORDER BY created_at ASC", USER_SELECT))
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::SqlxError)?;

        Ok(rows.iter().map(user_from_row).collect())
    }
}

const USER_SELECT: &str = r#"
    SELECT id, username, profile_image_url, email_address,
           first_name, last_name, private_metadata, created_at
    FROM users"#;

fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

fn post_from_row(row: &SqliteRow) -> Post {
    Post {
        id: row.get("id"),
        content: row.get("content"),
        author_id: row.get("author_id"),
        created_at: from_millis(row.get("created_at")),
    }
}

fn user_from_row(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        profile_image_url: row.get("profile_image_url"),
        email_address: row.get("email_address"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        private_metadata: row.get("private_metadata"),
        created_at: from_millis(row.get("created_at")),
    }
}
