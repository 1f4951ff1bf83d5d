//! services/web/src/web/pages.rs
//!
//! HTML rendering adapter. Builds complete pages around the fragments produced by
//! `bulletin_core::render` and applies the `NavView` projection to the navigation bar.

use bulletin_core::messages;
use bulletin_core::navigation::{INDEX_PATH, LOGIN_PATH, NEW_POST_PATH};
use bulletin_core::render::escape_html;
use bulletin_core::view::{AuthMode, NavView};

/// Kind of inline feedback shown in the `#message` container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Inline feedback for the user. The text is escaped when rendered.
#[derive(Debug, Clone)]
pub struct Feedback {
    pub kind: MessageKind,
    pub text: String,
    /// Where the "stay" link points when a redirect is pending.
    pub stay_href: Option<&'static str>,
}

impl Feedback {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
            stay_href: None,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
            stay_href: None,
        }
    }

    /// Adds a link that leaves the page before the scheduled redirect fires.
    pub fn with_stay_link(mut self, href: &'static str) -> Self {
        self.stay_href = Some(href);
        self
    }
}

fn display(visible: bool) -> &'static str {
    if visible {
        ""
    } else {
        r#" style="display:none""#
    }
}

/// Navigation bar. All four controls are always present; hidden ones get `display:none`.
pub fn render_nav(nav: &NavView) -> String {
    format!(
        concat!(
            r#"<nav class="top-nav">"#,
            r#"<a class="brand" href="{index}">Bulletin Board</a>"#,
            r#"<span id="user-email"{email_style}>{email}</span>"#,
            r#"<a id="new-post-link" href="{new_post}"{new_post_style}>New post</a>"#,
            r#"<form method="post" action="/logout" class="logout-form">"#,
            r#"<button id="logout-button" type="submit"{logout_style}>Log out</button>"#,
            r#"</form>"#,
            r#"<a id="login-button" href="{login}"{login_style}>Log in</a>"#,
            r#"</nav>"#
        ),
        index = INDEX_PATH,
        email_style = display(nav.show_user_email),
        email = escape_html(&nav.user_email),
        new_post = NEW_POST_PATH,
        new_post_style = display(nav.show_new_post_link),
        logout_style = display(nav.show_logout_button),
        login = LOGIN_PATH,
        login_style = display(nav.show_login_button),
    )
}

/// The `#message` container. Empty when there is nothing to say.
pub fn render_message(feedback: Option<&Feedback>) -> String {
    let Some(feedback) = feedback else {
        return r#"<div id="message"></div>"#.to_string();
    };

    let class = match feedback.kind {
        MessageKind::Success => "message success",
        MessageKind::Error => "message error",
    };
    let stay = feedback
        .stay_href
        .map(|href| {
            format!(
                r#" <a class="stay-link" href="{}">{}</a>"#,
                href,
                messages::STAY_ON_PAGE
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div id="message" class="{}" role="status">{}{}</div>"#,
        class,
        escape_html(&feedback.text),
        stay
    )
}

fn layout(title: &str, nav: &NavView, body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en"><head><meta charset="utf-8">"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
            "<title>{title}</title></head>\n",
            "<body>{nav}\n<main>{body}</main></body></html>\n"
        ),
        title = escape_html(title),
        nav = render_nav(nav),
        body = body,
    )
}

/// The listing page. `posts_html` is the already-rendered list container content.
pub fn index_page(nav: &NavView, posts_html: &str) -> String {
    let body = format!(
        r#"<h1>Posts</h1><section id="posts-container">{}</section>"#,
        posts_html
    );
    layout("Bulletin Board", nav, &body)
}

/// Values typed into the login form, echoed back when it is re-rendered.
#[derive(Debug, Clone, Default)]
pub struct LoginFormView {
    pub mode: AuthMode,
    pub email: String,
}

pub fn login_page(nav: &NavView, form: &LoginFormView, feedback: Option<&Feedback>) -> String {
    let (login_class, signup_class) = match form.mode {
        AuthMode::Login => ("toggle active", "toggle"),
        AuthMode::SignUp => ("toggle", "toggle active"),
    };
    let submit_label = match form.mode {
        AuthMode::Login => "Log in",
        AuthMode::SignUp => "Sign up",
    };

    let body = format!(
        concat!(
            r#"<h1>Log in or sign up</h1>"#,
            r#"<div class="auth-toggle">"#,
            r#"<a id="login-toggle" class="{login_class}" href="{login}?mode=login">Log in</a>"#,
            r#"<a id="signup-toggle" class="{signup_class}" href="{login}?mode=signup">Sign up</a>"#,
            r#"</div>"#,
            r#"<form id="login-form" method="post" action="{login}">"#,
            r#"<input type="hidden" name="mode" value="{mode}">"#,
            r#"<label for="email">Email</label>"#,
            r#"<input id="email" name="email" type="email" value="{email}" autocomplete="email">"#,
            r#"<label for="password">Password</label>"#,
            r#"<input id="password" name="password" type="password" autocomplete="current-password">"#,
            r#"<button type="submit">{submit}</button>"#,
            r#"</form>"#,
            "{message}"
        ),
        login_class = login_class,
        signup_class = signup_class,
        login = LOGIN_PATH,
        mode = form.mode.as_str(),
        email = escape_html(&form.email),
        submit = submit_label,
        message = render_message(feedback),
    );
    layout("Log in", nav, &body)
}

/// Values typed into the new-post form.
#[derive(Debug, Clone, Default)]
pub struct PostFormView {
    pub title: String,
    pub content: String,
}

pub fn new_post_page(nav: &NavView, form: &PostFormView, feedback: Option<&Feedback>) -> String {
    let body = format!(
        concat!(
            r#"<h1>New post</h1>"#,
            r#"<form id="post-form" method="post" action="{action}">"#,
            r#"<label for="title">Title</label>"#,
            r#"<input id="title" name="title" type="text" maxlength="100" value="{title}">"#,
            r#"<label for="content">Content</label>"#,
            r#"<textarea id="content" name="content" rows="8">{content}</textarea>"#,
            r#"<button type="submit">Post</button>"#,
            r#"</form>"#,
            "{message}"
        ),
        action = NEW_POST_PATH,
        title = escape_html(&form.title),
        content = escape_html(&form.content),
        message = render_message(feedback),
    );
    layout("New post", nav, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulletin_core::domain::User;
    use uuid::Uuid;

    fn logged_in() -> NavView {
        NavView::project(Some(&User {
            user_id: Uuid::new_v4(),
            email: Some("<me>@b.com".to_string()),
        }))
    }

    #[test]
    fn logged_out_nav_hides_user_controls() {
        let html = render_nav(&NavView::project(None));
        assert!(html.contains(r#"<span id="user-email" style="display:none">"#));
        assert!(html.contains(r#"id="new-post-link" href="/posts/new" style="display:none""#));
        assert!(html.contains(r#"id="logout-button" type="submit" style="display:none""#));
        assert!(html.contains(r#"<a id="login-button" href="/login">"#));
    }

    #[test]
    fn logged_in_nav_shows_escaped_email() {
        let html = render_nav(&logged_in());
        assert!(html.contains(r#"<span id="user-email">&lt;me&gt;@b.com</span>"#));
        assert!(html.contains(r#"id="login-button" href="/login" style="display:none""#));
        assert!(html.contains(r#"<button id="logout-button" type="submit">"#));
    }

    #[test]
    fn only_the_selected_mode_is_emphasised() {
        let form = LoginFormView {
            mode: AuthMode::SignUp,
            email: String::new(),
        };
        let html = login_page(&NavView::project(None), &form, None);
        assert!(html.contains(r#"<a id="signup-toggle" class="toggle active""#));
        assert!(html.contains(r#"<a id="login-toggle" class="toggle""#));
        assert!(html.contains(r#"name="mode" value="signup""#));
        assert_eq!(html.matches("toggle active").count(), 1);
    }

    #[test]
    fn message_text_is_escaped() {
        let html = render_message(Some(&Feedback::error("<b>bad</b>")));
        assert_eq!(
            html,
            r#"<div id="message" class="message error" role="status">&lt;b&gt;bad&lt;/b&gt;</div>"#
        );
    }

    #[test]
    fn stay_link_is_rendered_with_pending_redirect() {
        let html = render_message(Some(&Feedback::success("done").with_stay_link(NEW_POST_PATH)));
        assert!(html.contains(r#"<a class="stay-link" href="/posts/new">Stay on this page</a>"#));
    }

    #[test]
    fn post_form_echoes_escaped_values() {
        let form = PostFormView {
            title: "\"quoted\"".to_string(),
            content: "</textarea><script>".to_string(),
        };
        let html = new_post_page(&logged_in(), &form, None);
        assert!(html.contains(r#"value="&quot;quoted&quot;""#));
        assert!(html.contains("&lt;/textarea&gt;&lt;script&gt;</textarea>"));
    }
}
