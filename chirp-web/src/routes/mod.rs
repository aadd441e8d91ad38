//! Route definitions.
//!
//! ## Routes
//!
//! - `GET /` - Home page: sign-in control or create-post form, then the global feed
//! - `GET /health` - Health check (JSON)
//! - `POST /posts` - Create a post, then redirect to `/`
//! - `GET /post/{id}` - Single post
//! - `GET /@{username}` - Profile page (matched as `/{slug}`)

mod health;
mod home;
mod post;
mod posts;
mod profile;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home_page))
        .route("/health", get(health::health_check))
        .route("/posts", post(posts::create_post))
        .route("/post/{id}", get(post::post_page))
        .route("/{slug}", get(profile::profile_page))
        .with_state(state)
}
