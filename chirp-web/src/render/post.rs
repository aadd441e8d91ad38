//! Post card

use chrono::{DateTime, Utc};
use maud::{html, Markup};

use libchirp::PostWithAuthor;

use super::components::avatar;
use super::time::relative_time;

/// One post: avatar, `@handle`, age, content
///
/// The age is computed from `now` on every render. Content is shown in full.
pub fn post_card(item: &PostWithAuthor, now: DateTime<Utc>) -> Markup {
    let PostWithAuthor { post, author } = item;
    let alt = format!("@{}'s profile picture", author.username);

    html! {
        div class="post" id={ "post-" (post.id) } {
            (avatar(author, "avatar-sm", &alt))
            div class="post-body" {
                div class="post-meta" {
                    a href={ "/@" (author.username) } {
                        span class="post-handle" { "@" (author.username) }
                    }
                    a href={ "/post/" (post.id) } {
                        span class="post-time" { " · " (relative_time(post.created_at, now)) }
                    }
                }
                span class="post-content" { (post.content) }
            }
        }
    }
}
