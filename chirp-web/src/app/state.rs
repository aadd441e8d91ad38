//! Create-post form state
//!
//! Immutable value; every transition goes through the reducer.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposerState {
    /// Current input text
    pub draft: String,

    /// A create call is in flight
    pub submitting: bool,

    /// Transient error message waiting to be shown
    pub toast: Option<String>,

    /// Id of the last post this form created
    pub last_post_id: Option<String>,
}

impl ComposerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a submission may start now
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.draft.is_empty()
    }

    /// Whether the submit button is rendered
    ///
    /// Pressing Enter in the input submits regardless.
    pub fn shows_submit(&self) -> bool {
        self.can_submit()
    }
}
