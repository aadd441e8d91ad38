//! Signed-in user resolution
//!
//! Authentication happens upstream. The auth proxy puts the user id in a
//! trusted request header; this module only looks that id up.

use std::sync::Arc;

use axum::http::{HeaderMap, HeaderName};
use libchirp::{Author, ChirpError, ProfileApi, Result};

#[derive(Clone)]
pub struct SessionResolver {
    header: HeaderName,
    profiles: Arc<dyn ProfileApi>,
}

impl SessionResolver {
    pub fn new(header: &str, profiles: Arc<dyn ProfileApi>) -> Result<Self> {
        let header = HeaderName::try_from(header).map_err(|e| {
            ChirpError::InvalidInput(format!("auth.user_header '{}' is not a valid header name: {}", header, e))
        })?;
        Ok(Self { header, profiles })
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    /// The signed-in user, or `None` when the header is absent or unknown
    pub async fn current_user(&self, headers: &HeaderMap) -> Result<Option<Author>> {
        let Some(user_id) = headers
            .get(&self.header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
        else {
            return Ok(None);
        };

        let user = self.profiles.get_user_by_id(user_id).await?;
        if user.is_none() {
            tracing::debug!(user_id = %user_id, "session header names unknown user");
        }
        Ok(user)
    }
}
