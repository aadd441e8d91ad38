//! Public user lookups
//!
//! Every record leaving this service goes through
//! [`filter_user_for_client`](crate::filter_user_for_client).

use std::sync::Arc;

use crate::projection::filter_user_for_client;
use crate::types::Author;
use crate::{Database, Result};

#[derive(Clone)]
pub struct ProfileService {
    db: Arc<Database>,
}

impl ProfileService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Exact, case-sensitive username match
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<Author>> {
        let user = self.db.get_user_by_username(username).await?;
        if user.is_none() {
            tracing::debug!(username = %username, "profile not found");
        }
        Ok(user.as_ref().map(filter_user_for_client))
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Result<Option<Author>> {
        let user = self.db.get_user(user_id).await?;
        Ok(user.as_ref().map(filter_user_for_client))
    }
}
