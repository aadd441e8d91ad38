//! Error types for the web front end.
//!
//! Errors are rendered as HTML pages. Internal details are logged, never shown.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{html, PreEscaped, DOCTYPE};

use crate::render::components::ERROR_CSS;

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Unknown profile, post or route
    #[error("not found: {0}")]
    NotFound(String),

    /// A signed-in user is required
    #[error("unauthorized")]
    Unauthorized { sign_in_url: String },

    #[error("internal error: {0}")]
    Internal(#[from] libchirp::ChirpError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, heading, body) = match &self {
            Self::NotFound(what) => {
                tracing::debug!(what = %what, "not found");
                (StatusCode::NOT_FOUND, "404", html! { p { "Page not found" } })
            }
            Self::Unauthorized { sign_in_url } => (
                StatusCode::UNAUTHORIZED,
                "Sign in required",
                html! {
                    p { "You need to be signed in to post." }
                    a href=(sign_in_url) { "Sign in" }
                },
            ),
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong",
                    html! { p { "An internal error occurred. Please try again later." } },
                )
            }
        };

        let markup = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (heading) }
                    style { (PreEscaped(ERROR_CSS)) }
                }
                body {
                    main class="error-page" {
                        h1 { (heading) }
                        (body)
                        p { a href="/" { "Back to the feed" } }
                    }
                }
            }
        };

        (status, markup).into_response()
    }
}
