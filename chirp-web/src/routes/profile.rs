//! Profile page

use axum::extract::{Path, State};
use maud::Markup;

use crate::app::profile::parse_profile_slug;
use crate::app::FeedScope;
use crate::error::WebError;
use crate::render;
use crate::state::AppState;

/// `GET /@{username}`; resolved on every request, nothing is pre-generated
pub async fn profile_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Markup, WebError> {
    let username = parse_profile_slug(&slug).ok_or_else(|| WebError::NotFound(slug.clone()))?;

    let author = state
        .profiles
        .get_user_by_username(username)
        .await?
        .ok_or_else(|| WebError::NotFound(format!("@{}", username)))?;

    let feed = state
        .queries
        .feed(state.posts.clone(), FeedScope::Author(author.id.clone()))
        .await;

    Ok(render::profile_page(
        &state.config.web.site_name,
        &author,
        &feed,
        chrono::Utc::now(),
    ))
}
