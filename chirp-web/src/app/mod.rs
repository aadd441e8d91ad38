//! View-layer state
//!
//! - `actions` / `state` / `reducer`: the create-post form as a pure state machine
//! - `composer`: the controller that runs submissions against the backend
//! - `query`: cached feed queries with invalidation
//! - `feed` / `profile`: feed view models and profile route parsing

pub mod actions;
pub mod composer;
pub mod feed;
pub mod profile;
pub mod query;
pub mod reducer;
pub mod state;

pub use actions::Action;
pub use composer::{Composer, SubmitOutcome};
pub use feed::{FeedScope, FeedState};
pub use query::QueryCache;
pub use reducer::reduce;
pub use state::ComposerState;
