//! Actions for the create-post form
//!
//! All composer state transitions are triggered by these actions. The
//! reducer (see `reducer.rs`) applies them.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Draft text changed
    DraftChanged(String),

    /// Submission handed to the backend
    SubmitStarted,

    /// Backend accepted the post
    SubmitSucceeded { post_id: String },

    /// Backend rejected the post or the call failed
    SubmitFailed { message: String },

    /// Toast has been shown
    DismissToast,
}
