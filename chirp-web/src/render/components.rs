//! Shared HTML components used across all pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use libchirp::Author;

/// Inline CSS for all pages.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#000;--fg:#e2e8f0;--fg2:#94a3b8;--fg3:#64748b;--accent:#38bdf8;--border:#334155;--danger:#f87171}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.5;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;justify-content:center}
main{width:100%;max-width:42rem;min-height:100vh;border-left:1px solid var(--border);border-right:1px solid var(--border)}
a{color:inherit;text-decoration:none}
a:hover{text-decoration:underline}

.topbar{display:flex;align-items:center;justify-content:space-between;gap:1rem;padding:1rem;border-bottom:1px solid var(--border)}
.topbar-title{font-weight:700;font-size:1.1rem}
.topbar a.button{padding:.35rem .9rem;border:1px solid var(--border);border-radius:999px;font-size:.9rem}

.avatar{border-radius:50%;flex-shrink:0;display:flex;align-items:center;justify-content:center;background:var(--accent);color:#000;font-weight:700;text-transform:uppercase;overflow:hidden}
.avatar img{width:100%;height:100%;object-fit:cover}
.avatar-sm{width:56px;height:56px;font-size:1.4rem}
.avatar-lg{width:128px;height:128px;font-size:3rem;border:4px solid var(--bg)}

.composer{display:flex;gap:.75rem;width:100%;padding:1rem;border-bottom:1px solid var(--border)}
.composer-form{display:flex;flex:1;align-items:center;gap:.5rem}
.composer-form input{flex:1;background:transparent;border:none;outline:none;color:var(--fg);font-size:1.1rem}
.composer-form button{background:none;border:none;color:var(--accent);font-size:1rem;cursor:pointer}

.toast{margin:.75rem 1rem;padding:.6rem .9rem;border:1px solid var(--danger);border-radius:6px;color:var(--danger);font-size:.95rem}

.feed{display:flex;flex-direction:column}
.feed-status{display:flex;justify-content:center;padding:2rem 1rem;color:var(--fg2)}
.feed-error{color:var(--danger)}

.post{display:flex;gap:.75rem;padding:1rem;border-bottom:1px solid var(--border)}
.post-body{display:flex;flex-direction:column;min-width:0}
.post-meta{display:flex;gap:.25rem;color:var(--fg2)}
.post-time{font-weight:300}
.post-content{font-size:1.5rem;white-space:pre-wrap;word-break:break-word}

.profile-banner{position:relative;height:9rem;background:#1e293b}
.profile-banner .avatar{position:absolute;bottom:-64px;left:1rem}
.profile-handle{padding:5rem 1rem 1rem;font-size:1.5rem;font-weight:700;border-bottom:1px solid var(--border)}

.spinner{width:32px;height:32px;border-radius:50%;border:4px solid var(--border);border-top-color:var(--accent);animation:spin 1s linear infinite}
.spinner-sm{width:20px;height:20px;border-width:3px}
@keyframes spin{to{transform:rotate(360deg)}}
"#;

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#000;color:#e2e8f0;padding:1rem}
.error-page{text-align:center;max-width:400px}
.error-page h1{font-size:2rem;margin-bottom:.75rem}
.error-page p{color:#94a3b8;margin-bottom:1rem;line-height:1.5}
.error-page a{color:#38bdf8}
"#;

/// Seconds between reloads while a feed is still loading
const LOADING_REFRESH_SECS: u32 = 2;

/// Render the full HTML page shell
///
/// `refresh` adds a meta refresh so a page showing a loading feed picks up
/// the data once it lands in the cache.
pub fn page_shell(title: &str, site_name: &str, refresh: bool, body_content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content={ "💭 " (site_name) };
                meta property="og:site_name" content=(site_name);
                @if refresh {
                    meta http-equiv="refresh" content=(LOADING_REFRESH_SECS);
                }
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                main { (body_content) }
            }
        }
    }
}

/// Avatar picture, or the first letter of the username when the image URL
/// is not http(s)
pub fn avatar(author: &Author, size_class: &str, alt: &str) -> Markup {
    let initial = author
        .username
        .chars()
        .next()
        .unwrap_or('?')
        .to_uppercase()
        .to_string();

    html! {
        div class={ "avatar " (size_class) } {
            @if is_safe_url(&author.profile_image_url) {
                img src=(author.profile_image_url) alt=(alt);
            } @else {
                (initial)
            }
        }
    }
}

pub fn spinner(small: bool) -> Markup {
    html! {
        div.spinner.spinner-sm[small] role="status" {}
    }
}

pub fn toast(message: &str) -> Markup {
    html! {
        div class="toast" role="alert" { (message) }
    }
}

/// Only http and https URLs are emitted into attributes.
pub fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}
