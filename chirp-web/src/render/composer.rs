//! Create-post form and the signed-out alternative

use maud::{html, Markup};

use libchirp::Author;

use super::components::{avatar, spinner, toast};
use crate::app::ComposerState;

const PLACEHOLDER: &str = "Type some emojis!";

/// The form posts to `/posts`; Enter in the input submits it.
pub fn composer_form(user: &Author, state: &ComposerState, toast_message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = toast_message {
            (toast(message))
        }
        div class="composer" {
            (avatar(user, "avatar-sm", "Profile image"))
            form class="composer-form" method="post" action="/posts" {
                input type="text" name="content" placeholder=(PLACEHOLDER)
                    value=(state.draft) autocomplete="off" autofocus
                    disabled[state.submitting];
                @if state.shows_submit() {
                    button type="submit" { "Post" }
                }
                @if state.submitting {
                    (spinner(true))
                }
            }
        }
    }
}

pub fn sign_in_link(sign_in_url: &str) -> Markup {
    html! {
        a class="button" href=(sign_in_url) { "Sign in" }
    }
}

pub fn sign_out_link(sign_out_url: &str) -> Markup {
    html! {
        a class="button" href=(sign_out_url) { "Sign out" }
    }
}
