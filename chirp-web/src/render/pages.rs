//! Full pages

use chrono::{DateTime, Utc};
use maud::{html, Markup};

use libchirp::{Author, PostWithAuthor};

use super::components::{avatar, page_shell};
use super::composer::{composer_form, sign_in_link, sign_out_link};
use super::feed::feed;
use super::post::post_card;
use crate::app::{ComposerState, FeedScope, FeedState};

/// Signed-in user's form state for the home page
pub struct ComposerView<'a> {
    pub user: &'a Author,
    pub state: &'a ComposerState,
    pub toast: Option<&'a str>,
}

pub struct HomePage<'a> {
    pub site_name: &'a str,
    pub sign_in_url: &'a str,
    pub sign_out_url: &'a str,
    pub composer: Option<ComposerView<'a>>,
    pub feed: &'a FeedState,
    pub now: DateTime<Utc>,
}

/// Sign-in control or create-post form, then the global feed
pub fn home_page(page: &HomePage<'_>) -> Markup {
    let body = html! {
        div class="topbar" {
            span class="topbar-title" { (page.site_name) }
            @if page.composer.is_some() {
                (sign_out_link(page.sign_out_url))
            } @else {
                (sign_in_link(page.sign_in_url))
            }
        }
        @if let Some(view) = &page.composer {
            (composer_form(view.user, view.state, view.toast))
        }
        (feed(page.feed, &FeedScope::All, page.now))
    };

    // Also poll while a submission is in flight so the spinner resolves
    let refresh = page.feed.is_loading()
        || page.composer.as_ref().is_some_and(|c| c.state.submitting);

    page_shell(page.site_name, page.site_name, refresh, body)
}

/// Banner, avatar and `@handle`, then the author's feed
///
/// The document title is the bare username.
pub fn profile_page(
    site_name: &str,
    author: &Author,
    posts: &FeedState,
    now: DateTime<Utc>,
) -> Markup {
    let alt = format!("{}'s profile pic", author.username);
    let scope = FeedScope::Author(author.id.clone());

    let body = html! {
        div class="profile-banner" {
            (avatar(author, "avatar-lg", &alt))
        }
        div class="profile-handle" { "@" (author.username) }
        (feed(posts, &scope, now))
    };

    page_shell(&author.username, site_name, posts.is_loading(), body)
}

/// A single post card
pub fn post_page(site_name: &str, item: &PostWithAuthor, now: DateTime<Utc>) -> Markup {
    let title = format!("{} - @{}", item.post.content, item.author.username);

    let body = html! {
        div class="topbar" {
            a class="topbar-title" href="/" { (site_name) }
        }
        (post_card(item, now))
    };

    page_shell(&title, site_name, false, body)
}
