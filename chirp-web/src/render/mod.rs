//! HTML rendering
//!
//! All rendering uses [maud](https://maud.lambda.xyz/); every dynamic value
//! is escaped. Renderers are pure functions of their inputs, including the
//! `now` used for relative timestamps.

pub mod components;
pub mod composer;
pub mod feed;
pub mod pages;
pub mod post;
pub mod time;

pub use pages::{home_page, post_page, profile_page, ComposerView, HomePage};
pub use post::post_card;
pub use time::relative_time;
