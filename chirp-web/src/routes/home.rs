//! Home page

use axum::extract::State;
use axum::http::HeaderMap;
use maud::Markup;

use crate::app::FeedScope;
use crate::error::WebError;
use crate::render::{self, ComposerView, HomePage};
use crate::state::AppState;

pub async fn home_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Markup, WebError> {
    // Start the feed query before the session lookup so both overlap
    state.queries.prefetch(state.posts.clone(), FeedScope::All);

    let user = state.session.current_user(&headers).await?;
    let feed = state
        .queries
        .feed(state.posts.clone(), FeedScope::All)
        .await;

    let composer = match &user {
        Some(user) => {
            let composer = state.composer_for(&user.id).await;
            let toast = composer.take_toast();
            Some((composer.snapshot(), toast))
        }
        None => None,
    };

    let auth = &state.config.auth;
    let page = HomePage {
        site_name: &state.config.web.site_name,
        sign_in_url: &auth.sign_in_url,
        sign_out_url: &auth.sign_out_url,
        composer: user.as_ref().zip(composer.as_ref()).map(|(user, (form, toast))| {
            ComposerView {
                user,
                state: form,
                toast: toast.as_deref(),
            }
        }),
        feed: &feed,
        now: chrono::Utc::now(),
    };

    Ok(render::home_page(&page))
}
