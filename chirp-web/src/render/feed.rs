//! Feed container

use chrono::{DateTime, Utc};
use maud::{html, Markup};

use super::components::spinner;
use super::post::post_card;
use crate::app::{FeedScope, FeedState};

pub fn feed(state: &FeedState, scope: &FeedScope, now: DateTime<Utc>) -> Markup {
    html! {
        @match state {
            FeedState::Loading => {
                div class="feed-status feed-loading" { (spinner(false)) }
            }
            FeedState::Empty => {
                div class="feed-status feed-empty" { (scope.empty_message()) }
            }
            FeedState::Error(message) => {
                div class="feed-status feed-error" role="alert" { (message) }
            }
            FeedState::Populated(items) => {
                div class="feed" {
                    @for item in items {
                        (post_card(item, now))
                    }
                }
            }
        }
    }
}
