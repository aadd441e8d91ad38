//! Single post page

use axum::extract::{Path, State};
use maud::Markup;

use crate::error::WebError;
use crate::render;
use crate::state::AppState;

pub async fn post_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Markup, WebError> {
    let item = state
        .posts
        .get_by_id(&id)
        .await?
        .ok_or_else(|| WebError::NotFound(format!("post {}", id)))?;

    Ok(render::post_page(
        &state.config.web.site_name,
        &item,
        chrono::Utc::now(),
    ))
}
