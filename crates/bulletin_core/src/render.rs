//! crates/bulletin_core/src/render.rs
//!
//! Turns posts into HTML fragments. Every piece of user-supplied text goes
//! through `escape_html` before it is placed in markup.

use chrono::FixedOffset;

use crate::domain::{sort_newest_first, Post};
use crate::messages;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Escapes the five HTML metacharacters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes `input` and turns line breaks into `<br>`.
pub fn escape_multiline(input: &str) -> String {
    escape_html(input)
        .replace("\r\n", "\n")
        .replace('\n', "<br>")
}

/// Renders one post as an `<article>`.
pub fn render_post(post: &Post, offset: &FixedOffset) -> String {
    let title = if post.title.trim().is_empty() {
        messages::UNTITLED.to_string()
    } else {
        escape_html(&post.title)
    };
    let timestamp = post
        .created_at
        .with_timezone(offset)
        .format(TIMESTAMP_FORMAT)
        .to_string();

    format!(
        concat!(
            r#"<article class="post" data-post-id="{id}">"#,
            r#"<h2 class="post-title">{title}</h2>"#,
            r#"<div class="post-content">{content}</div>"#,
            r#"<div class="post-meta">"#,
            r#"<time datetime="{iso}">{timestamp}</time>"#,
            r#"<span class="comment-count">{comments} comments</span>"#,
            r#"</div>"#,
            r#"</article>"#
        ),
        id = post.id,
        title = title,
        content = escape_multiline(&post.content),
        iso = post.created_at.to_rfc3339(),
        timestamp = timestamp,
        comments = post.comments(),
    )
}

/// Renders the inner HTML of the post list container, newest post first.
pub fn render_post_list(posts: &[Post], offset: &FixedOffset) -> String {
    if posts.is_empty() {
        return format!(r#"<p class="no-posts">{}</p>"#, messages::NO_POSTS);
    }

    let mut ordered = posts.to_vec();
    sort_newest_first(&mut ordered);
    ordered
        .iter()
        .map(|post| render_post(post, offset))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Placeholder shown in the post list when the backend query fails.
pub fn render_load_error() -> String {
    format!(r#"<p class="error">{}</p>"#, messages::LOAD_POSTS_FAILED)
}
