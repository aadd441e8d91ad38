//! Create-post form controller
//!
//! One `Composer` per signed-in user. It holds the form state behind a short
//! mutex and drives the backend call, keeping at most one submission in
//! flight. The lock is never held across an await.

use std::sync::{Mutex, MutexGuard, PoisonError};

use libchirp::service::validation::CONTENT_FIELD;
use libchirp::{ChirpError, Post, PostsApi};
use tracing::{info, warn};

use super::actions::Action;
use super::query::QueryCache;
use super::reducer::reduce;
use super::state::ComposerState;

/// Toast text when the failure carries no field message
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to post! Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Posted(Post),
    /// Toast message shown to the user
    Failed(String),
    /// Nothing to submit, or a submission was already in flight
    Ignored,
}

pub struct Composer {
    author_id: String,
    state: Mutex<ComposerState>,
}

impl Composer {
    pub fn new(author_id: impl Into<String>) -> Self {
        Self {
            author_id: author_id.into(),
            state: Mutex::new(ComposerState::new()),
        }
    }

    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    pub fn snapshot(&self) -> ComposerState {
        self.lock().clone()
    }

    pub fn dispatch(&self, action: Action) {
        let mut state = self.lock();
        let current = std::mem::take(&mut *state);
        *state = reduce(current, action);
    }

    /// Remove the pending toast, returning it
    pub fn take_toast(&self) -> Option<String> {
        let mut state = self.lock();
        let toast = state.toast.clone();
        let current = std::mem::take(&mut *state);
        *state = reduce(current, Action::DismissToast);
        toast
    }

    /// Submit the current draft
    ///
    /// On success the query cache is invalidated and the draft cleared. On
    /// failure the draft is kept and a toast is queued.
    pub async fn submit(&self, posts: &dyn PostsApi, cache: &QueryCache) -> SubmitOutcome {
        let draft = {
            let mut state = self.lock();
            if !state.can_submit() {
                return SubmitOutcome::Ignored;
            }
            let current = std::mem::take(&mut *state);
            *state = reduce(current, Action::SubmitStarted);
            state.draft.clone()
        };

        match posts.create(&self.author_id, &draft).await {
            Ok(post) => {
                cache.invalidate_all();
                self.dispatch(Action::SubmitSucceeded {
                    post_id: post.id.clone(),
                });
                info!(post_id = %post.id, author_id = %self.author_id, "post submitted");
                SubmitOutcome::Posted(post)
            }
            Err(error) => {
                let message = failure_message(&error);
                warn!(author_id = %self.author_id, error = %error, "post submission failed");
                self.dispatch(Action::SubmitFailed {
                    message: message.clone(),
                });
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ComposerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Message for a failed create: the first `content` field error, if any
pub fn failure_message(error: &ChirpError) -> String {
    error
        .validation_detail()
        .and_then(|detail| detail.first(CONTENT_FIELD))
        .map(str::to_string)
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use libchirp::{ApiError, ValidationError};

    #[test]
    fn test_failure_message_prefers_content_field() {
        let error: ChirpError =
            ApiError::RateLimited(ValidationError::field("content", "slow down")).into();
        assert_eq!(failure_message(&error), "slow down");
    }

    #[test]
    fn test_failure_message_ignores_other_fields() {
        let error: ChirpError =
            ApiError::Validation(ValidationError::field("author", "missing")).into();
        assert_eq!(failure_message(&error), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_failure_message_generic_fallback() {
        let error: ChirpError = ApiError::Internal("boom".to_string()).into();
        assert_eq!(failure_message(&error), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_take_toast_clears_it() {
        let composer = Composer::new("user_1");
        composer.dispatch(Action::DraftChanged("hi".to_string()));
        composer.dispatch(Action::SubmitStarted);
        composer.dispatch(Action::SubmitFailed {
            message: "nope".to_string(),
        });

        assert_eq!(composer.take_toast().as_deref(), Some("nope"));
        assert_eq!(composer.take_toast(), None);
        assert_eq!(composer.snapshot().draft, "hi");
    }
}
