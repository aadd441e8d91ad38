//! Pure reducer for the create-post form
//!
//! `(ComposerState, Action) -> ComposerState`. No I/O happens here; the
//! backend call and cache invalidation live in the `Composer` controller.

use super::actions::Action;
use super::state::ComposerState;

pub fn reduce(state: ComposerState, action: Action) -> ComposerState {
    match action {
        // The input is disabled while a post is in flight
        Action::DraftChanged(_) if state.submitting => state,

        Action::DraftChanged(draft) => ComposerState { draft, ..state },

        Action::SubmitStarted if !state.can_submit() => state,

        Action::SubmitStarted => ComposerState {
            submitting: true,
            toast: None,
            ..state
        },

        Action::SubmitSucceeded { post_id } => ComposerState {
            draft: String::new(),
            submitting: false,
            last_post_id: Some(post_id),
            ..state
        },

        Action::SubmitFailed { message } => ComposerState {
            submitting: false,
            toast: Some(message),
            ..state
        },

        Action::DismissToast => ComposerState {
            toast: None,
            ..state
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitting(draft: &str) -> ComposerState {
        let state = reduce(ComposerState::new(), Action::DraftChanged(draft.to_string()));
        reduce(state, Action::SubmitStarted)
    }

    #[test]
    fn test_draft_changed_updates_draft() {
        let state = reduce(ComposerState::new(), Action::DraftChanged("🐦".to_string()));
        assert_eq!(state.draft, "🐦");
        assert!(state.can_submit());
    }

    #[test]
    fn test_draft_ignored_while_submitting() {
        let state = submitting("first");
        let state = reduce(state, Action::DraftChanged("second".to_string()));
        assert_eq!(state.draft, "first");
    }

    #[test]
    fn test_submit_started_requires_draft() {
        let state = reduce(ComposerState::new(), Action::SubmitStarted);
        assert!(!state.submitting);
    }

    #[test]
    fn test_submit_started_twice_is_noop() {
        let once = submitting("hi");
        let twice = reduce(once.clone(), Action::SubmitStarted);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_success_clears_draft() {
        let state = reduce(
            submitting("hi"),
            Action::SubmitSucceeded {
                post_id: "p1".to_string(),
            },
        );
        assert_eq!(state.draft, "");
        assert!(!state.submitting);
        assert_eq!(state.last_post_id.as_deref(), Some("p1"));
        assert!(state.toast.is_none());
    }

    #[test]
    fn test_failure_keeps_draft_and_sets_toast() {
        let state = reduce(
            submitting("hi"),
            Action::SubmitFailed {
                message: "nope".to_string(),
            },
        );
        assert_eq!(state.draft, "hi");
        assert!(!state.submitting);
        assert_eq!(state.toast.as_deref(), Some("nope"));

        let state = reduce(state, Action::DismissToast);
        assert!(state.toast.is_none());
    }

    #[test]
    fn test_new_submission_clears_stale_toast() {
        let failed = reduce(
            submitting("hi"),
            Action::SubmitFailed {
                message: "nope".to_string(),
            },
        );
        let retry = reduce(failed, Action::SubmitStarted);
        assert!(retry.submitting);
        assert!(retry.toast.is_none());
    }
}
