//! Create-post form submission

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Redirect;
use axum::Form;
use serde::Deserialize;

use crate::app::{Action, SubmitOutcome};
use crate::error::WebError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewPostForm {
    #[serde(default)]
    pub content: String,
}

/// Submit the form for the signed-in user, then send them back to `/`
///
/// Failures surface as a toast on the next render of the home page.
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<NewPostForm>,
) -> Result<Redirect, WebError> {
    let Some(user) = state.session.current_user(&headers).await? else {
        return Err(WebError::Unauthorized {
            sign_in_url: state.config.auth.sign_in_url.clone(),
        });
    };

    let composer = state.composer_for(&user.id).await;
    composer.dispatch(Action::DraftChanged(form.content));

    match composer.submit(state.posts.as_ref(), &state.queries).await {
        SubmitOutcome::Posted(post) => {
            tracing::debug!(post_id = %post.id, "redirecting after post");
        }
        SubmitOutcome::Failed(message) => {
            tracing::debug!(message = %message, "redirecting with toast");
        }
        SubmitOutcome::Ignored => {
            tracing::debug!(user_id = %user.id, "submission ignored");
        }
    }

    Ok(Redirect::to("/"))
}
