//! Core types for Chirp

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A published post. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_id: String,
}

impl Post {
    pub fn new(author_id: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            created_at: Utc::now(),
            author_id,
        }
    }
}

/// Public-safe view of a user
///
/// Produced from a [`User`] by [`crate::filter_user_for_client`]; carries
/// nothing beyond these three fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub username: String,
    pub profile_image_url: String,
}

/// Full user record as held by the identity provider's directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub profile_image_url: String,
    pub email_address: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Opaque JSON blob, never exposed to clients
    pub private_metadata: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The unit rendered by a feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Author,
}
