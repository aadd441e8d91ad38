//! Chirp web front end
//!
//! A server-rendered view layer over the RPC boundary defined in `libchirp`.
//!
//! # Architecture
//!
//! - **App**: the create-post form as a pure reducer plus a controller that
//!   allows one submission in flight; cached feed queries with invalidation
//! - **Render**: HTML with maud (compile-time templates, escaped by default)
//! - **Routes**: axum handlers wiring session, queries and rendering together
//!
//! Identity comes from a header set by a trusted upstream auth proxy.

pub mod app;
pub mod error;
pub mod render;
pub mod routes;
pub mod session;
pub mod state;

pub use error::WebError;
pub use routes::router;
pub use state::AppState;
